//! Pasted-text parser.
//!
//! # Format
//!
//! Plain UTF-8 text, one entry per line (or per line pair). Blank lines are
//! ignored and every line is trimmed. Each entry is read as follows:
//!
//! 1. **Tag** - an optional `<tag>::` prefix picks the list's kind.
//!    `google::`, `reference::`, `serp::` mark search results;
//!    `assistant::`, `candidate::`, `ai::` (or no tag) mark citations.
//!    The tag must touch the `::` and must not be followed directly by a
//!    URL list, so `google :: a.com, b.com` is the query `google`.
//! 2. **Hard separator** - the first of `::`, tab, `|` found in the rest of
//!    the line splits it, at its first occurrence, into label and URL list.
//! 3. **Two-line block** - a line without a hard separator, followed by a
//!    line that looks like a URL list (contains a comma or an
//!    `http://` / `https://` / `www.` token) and contains no separator of
//!    its own, uses the second line as its URL list.
//! 4. **Phrase separator** - the first of `" - "`, `" : "` splits the line.
//! 5. **Bare label** - anything else is a label with no URLs.
//!
//! URL lists are comma-separated; pieces are trimmed and empty pieces
//! dropped. Labels are trimmed and lower-cased.
//!
//! ```text
//! best running shoes :: https://a.com/x, https://b.com/y
//! google::best running shoes :: https://a.com/x, https://c.com
//! trail shoes
//! https://d.com, https://e.com
//! hiking boots | https://f.com
//! waterproof jackets
//! ```

use crate::domain::entities::{EntryKey, EntryKind, ParsedMapping, Query};
use crate::utils::url_list::{looks_like_url_list, split_url_list};

/// Hard separators in priority order.
const HARD_SEPARATORS: [&str; 3] = ["::", "\t", "|"];

/// Phrase separators in priority order, tried after the two-line check.
const PHRASE_SEPARATORS: [&str; 2] = [" - ", " : "];

/// Parses pasted text into a [`ParsedMapping`].
///
/// Never fails: lines that match no pattern degrade to bare labels. Parsing
/// is deterministic; the same text always yields the same mapping. When a
/// `(kind, query)` label appears twice, the later URL list wins.
///
/// # Examples
///
/// ```ignore
/// let mapping = parse("foo bar :: a.com, b.com");
/// assert_eq!(mapping.candidates(&Query::parse("foo bar").unwrap()), ["a.com", "b.com"]);
/// ```
pub fn parse(text: &str) -> ParsedMapping {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let mut mapping = ParsedMapping::new();
    let mut i = 0;

    while i < lines.len() {
        let (kind, rest) = split_tag(lines[i]);

        let (label, urls, consumed) = if let Some((label, list)) = split_first(rest, &HARD_SEPARATORS)
        {
            (label, split_url_list(list), 1)
        } else if let Some(next) = lines.get(i + 1).filter(|next| is_url_line(next)) {
            (rest, split_url_list(next), 2)
        } else if let Some((label, list)) = split_first(rest, &PHRASE_SEPARATORS) {
            (label, split_url_list(list), 1)
        } else {
            tracing::debug!(line = i + 1, "No separator found, treating line as bare label");
            (rest, Vec::new(), 1)
        };

        match Query::parse(label) {
            Some(query) => {
                if mapping.insert(EntryKey::new(kind, query), urls) {
                    tracing::debug!(line = i + 1, "Duplicate label replaced earlier entry");
                }
            }
            None => tracing::debug!(line = i + 1, "Skipping entry with empty label"),
        }

        i += consumed;
    }

    mapping
}

/// Strips a recognized `<tag>::` prefix.
///
/// A line whose label merely spells a tag word (`ai :: https://x.com`)
/// keeps that word as its label.
fn split_tag(line: &str) -> (EntryKind, &str) {
    if let Some((tag, rest)) = line.split_once("::")
        && !tag.ends_with(char::is_whitespace)
        && let Some(kind) = EntryKind::from_tag(tag)
    {
        let rest = rest.trim();
        if !is_bare_url_list(rest) {
            return (kind, rest);
        }
    }
    (EntryKind::Candidate, line)
}

/// A URL list with no label of its own.
fn is_bare_url_list(text: &str) -> bool {
    looks_like_url_list(text) && split_first(text, &HARD_SEPARATORS).is_none()
}

/// Splits at the first occurrence of the highest-priority separator present.
fn split_first<'a>(line: &'a str, separators: &[&str]) -> Option<(&'a str, &'a str)> {
    separators
        .iter()
        .find_map(|sep| line.split_once(sep))
        .map(|(label, list)| (label.trim(), list.trim()))
}

/// Whether a line can serve as the URL half of a two-line block.
///
/// A tagged line always carries `::`, so the separator check rules it out.
fn is_url_line(line: &str) -> bool {
    looks_like_url_list(line)
        && !HARD_SEPARATORS
            .iter()
            .chain(PHRASE_SEPARATORS.iter())
            .any(|sep| line.contains(sep))
}
