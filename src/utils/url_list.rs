//! Comma-joined URL list helpers shared by the text and table readers.

use regex::Regex;
use std::sync::LazyLock;

/// Matches a token that is recognizably a URL rather than prose.
static URL_TOKEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\bhttps?://|\bwww\.)").unwrap());

/// Splits a comma-joined URL list.
///
/// Pieces are trimmed and empty pieces dropped; order and duplicates are kept.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(split_url_list(" a.com, ,b.com,a.com "), vec!["a.com", "b.com", "a.com"]);
/// ```
pub fn split_url_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}

/// Returns `true` if a line reads like a URL list: it contains a comma or a
/// recognizable URL token (`http://`, `https://`, `www.`).
pub fn looks_like_url_list(line: &str) -> bool {
    line.contains(',') || URL_TOKEN_REGEX.is_match(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_trims_and_drops_empty() {
        assert_eq!(
            split_url_list(" a.com, ,b.com,, a.com "),
            vec!["a.com", "b.com", "a.com"]
        );
    }

    #[test]
    fn test_split_empty() {
        assert!(split_url_list("").is_empty());
        assert!(split_url_list(" , ,").is_empty());
    }

    #[test]
    fn test_looks_like_url_list() {
        assert!(looks_like_url_list("a.com, b.com"));
        assert!(looks_like_url_list("https://example.com/page"));
        assert!(looks_like_url_list("WWW.example.com"));
        assert!(!looks_like_url_list("best running shoes"));
        assert!(!looks_like_url_list("a.com"));
    }
}
