//! Registrable-domain extraction for cited URLs.
//!
//! Reduces any URL-ish token to the domain a site owner actually registered,
//! so that `https://www.example.co.uk/page` and `http://blog.example.co.uk`
//! both count as `example.co.uk`.

use regex::Regex;
use std::sync::LazyLock;
use tldextract::{TldExtractor, TldOption};
use url::{Host, Url};

/// Matches an explicit `scheme://` prefix.
static EXPLICIT_SCHEME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://").unwrap());

/// Public Suffix List extractor, built from the snapshot shipped with the crate.
static EXTRACTOR: LazyLock<TldExtractor> =
    LazyLock::new(|| TldExtractor::new(TldOption::default()));

/// Normalizes a URL to its canonical registrable domain.
///
/// # Rules
///
/// 1. **Empty input**: returns an empty string, which callers treat as "no domain"
/// 2. **Scheme-less input**: parsed as if prefixed with `http://`
/// 3. **IP addresses and single-label hosts**: returned as-is
/// 4. **Listed public suffix**: `<label>.<suffix>` per the Public Suffix List
/// 5. **Host is itself a suffix**: the suffix
/// 6. **Unlisted suffix**: whatever label the extractor reports as the domain
/// 7. **No host at all**: the trimmed, lower-cased input
///
/// The result is always lower-case and normalization never fails. Applying it
/// to its own output returns the same value.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize("https://www.example.co.uk/page"), "example.co.uk");
/// assert_eq!(normalize("blog.rust-lang.org"), "rust-lang.org");
/// assert_eq!(normalize("not a url"), "not a url");
/// ```
pub fn normalize(url: &str) -> String {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    match extract_host(trimmed) {
        Some(ParsedHost::Address(addr)) => addr,
        Some(ParsedHost::Name(name)) => registrable_domain(&name),
        None => trimmed.to_lowercase(),
    }
}

/// Host component of a parsed URL.
enum ParsedHost {
    /// IPv4 or IPv6 literal.
    Address(String),
    /// Lower-cased domain name without a trailing dot.
    Name(String),
}

fn extract_host(input: &str) -> Option<ParsedHost> {
    let parsed = if EXPLICIT_SCHEME_REGEX.is_match(input) {
        Url::parse(input).ok()?
    } else {
        Url::parse(&format!("http://{input}")).ok()?
    };

    match parsed.host()? {
        Host::Ipv4(addr) => Some(ParsedHost::Address(addr.to_string())),
        Host::Ipv6(addr) => Some(ParsedHost::Address(format!("[{addr}]"))),
        Host::Domain(name) => {
            let name = name.trim_end_matches('.').to_lowercase();
            if name.is_empty() {
                None
            } else {
                Some(ParsedHost::Name(name))
            }
        }
    }
}

fn registrable_domain(host: &str) -> String {
    if !host.contains('.') {
        return host.to_string();
    }

    let Ok(result) = EXTRACTOR.extract(&format!("http://{host}/")) else {
        tracing::debug!(host, "Suffix extraction failed, keeping full host");
        return host.to_string();
    };

    let domain = result.domain.filter(|d| !d.is_empty());
    let suffix = result.suffix.filter(|s| !s.is_empty());

    match (domain, suffix) {
        (Some(domain), Some(suffix)) => format!("{domain}.{suffix}").to_lowercase(),
        (Some(domain), None) => domain.to_lowercase(),
        (None, Some(suffix)) => suffix.to_lowercase(),
        (None, None) => host.to_string(),
    }
}
