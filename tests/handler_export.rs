mod common;

use serde_json::json;

fn body() -> serde_json::Value {
    json!({
        "queries": "best shoes",
        "citations": "google::best shoes :: https://a.com/1, https://b.com/2\nbest shoes :: https://a.com/1, https://www.c.co.uk/x"
    })
}

#[tokio::test]
async fn test_export_results_csv() {
    let server = common::test_server(common::manual_state());

    let response = server.post("/api/export/results").json(&body()).await;

    response.assert_status_ok();
    assert_eq!(response.header("content-type"), "text/csv; charset=utf-8");
    assert!(
        response
            .header("content-disposition")
            .to_str()
            .unwrap()
            .contains("visibility_report.csv")
    );

    let text = response.text();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines[0],
        "query,referenceCount,candidateCount,sharedCount,novelCount,sharedRate,novelRate"
    );
    assert_eq!(lines[1], "best shoes,2,2,1,1,0.100,0.500");
}

#[tokio::test]
async fn test_export_domains_csv() {
    let server = common::test_server(common::manual_state());

    let response = server.post("/api/export/domains").json(&body()).await;

    response.assert_status_ok();

    let text = response.text();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines, ["domain,count,repeatRate", "a.com,1,1.000", "c.co.uk,1,1.000"]);
}

#[tokio::test]
async fn test_export_citations_csv() {
    let server = common::test_server(common::manual_state());

    let response = server.post("/api/export/citations").json(&body()).await;

    response.assert_status_ok();

    let text = response.text();
    assert!(text.starts_with("query,candidateUrl,candidateDomain\n"));
    assert!(text.contains("best shoes,https://www.c.co.uk/x,c.co.uk\n"));
}

#[tokio::test]
async fn test_export_narrative_report() {
    let server = common::test_server(common::manual_state());

    let response = server.post("/api/export/report").json(&body()).await;

    response.assert_status_ok();
    assert_eq!(response.header("content-type"), "text/plain; charset=utf-8");

    let text = response.text();
    assert!(text.contains("Queries analyzed: 1"));
    assert!(text.contains("Average shared visibility rate (SVR): 0.100"));
    assert!(text.contains("best shoes: SVR 0.100, UAVR 0.500."));
}

#[tokio::test]
async fn test_export_unknown_table() {
    let server = common::test_server(common::manual_state());

    let response = server.post("/api/export/everything").json(&body()).await;

    assert!(response.status_code().is_client_error());
}

#[tokio::test]
async fn test_export_empty_input() {
    let server = common::test_server(common::manual_state());

    let response = server
        .post("/api/export/results")
        .json(&json!({ "queries": "" }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["code"],
        "empty_input"
    );
}
