//! Parsed mapping from tagged labels to URL lists.

use super::query::Query;

/// Which side of the comparison a URL list belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// Search engine top results for the query.
    Reference,
    /// Sources the assistant cited for the query.
    Candidate,
}

impl EntryKind {
    /// Resolves a label tag (the part before `::`), case-insensitively.
    ///
    /// | Tag                                 | Kind        |
    /// |-------------------------------------|-------------|
    /// | `google`, `reference`, `serp`       | `Reference` |
    /// | `assistant`, `candidate`, `ai`      | `Candidate` |
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "google" | "reference" | "serp" => Some(Self::Reference),
            "assistant" | "candidate" | "ai" => Some(Self::Candidate),
            _ => None,
        }
    }
}

/// Structured label: a kind paired with a normalized query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryKey {
    pub kind: EntryKind,
    pub query: Query,
}

impl EntryKey {
    pub fn new(kind: EntryKind, query: Query) -> Self {
        Self { kind, query }
    }
}

/// Ordered mapping from [`EntryKey`] to URL lists.
///
/// Keys keep first-seen order. URL lists keep the order and duplicates they
/// were given in. Inserting an existing key replaces its list in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedMapping {
    entries: Vec<(EntryKey, Vec<String>)>,
}

impl ParsedMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the URL list for `key`.
    ///
    /// Returns `true` if an earlier list was replaced.
    pub fn insert(&mut self, key: EntryKey, urls: Vec<String>) -> bool {
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = urls;
            true
        } else {
            self.entries.push((key, urls));
            false
        }
    }

    /// Returns the URL list stored for `(kind, query)`.
    pub fn get(&self, kind: EntryKind, query: &Query) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(k, _)| k.kind == kind && k.query == *query)
            .map(|(_, urls)| urls.as_slice())
    }

    /// Candidate (assistant) URLs for a query, empty if absent.
    pub fn candidates(&self, query: &Query) -> &[String] {
        self.get(EntryKind::Candidate, query).unwrap_or_default()
    }

    /// Reference (search) URLs for a query, empty if absent.
    pub fn references(&self, query: &Query) -> &[String] {
        self.get(EntryKind::Reference, query).unwrap_or_default()
    }

    /// Queries with an entry of the given kind, in first-seen order.
    pub fn queries(&self, kind: EntryKind) -> Vec<Query> {
        self.entries
            .iter()
            .filter(|(k, _)| k.kind == kind)
            .map(|(k, _)| k.query.clone())
            .collect()
    }

    /// Every distinct query in the mapping regardless of kind, first-seen order.
    pub fn all_queries(&self) -> Vec<Query> {
        let mut out: Vec<Query> = Vec::new();
        for (key, _) in &self.entries {
            if !out.contains(&key.query) {
                out.push(key.query.clone());
            }
        }
        out
    }

    pub fn iter(&self) -> impl Iterator<Item = (&EntryKey, &[String])> {
        self.entries.iter().map(|(k, v)| (k, v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Moves every entry of `other` into `self`, replacing duplicates.
    pub fn extend(&mut self, other: ParsedMapping) {
        for (key, urls) in other.entries {
            self.insert(key, urls);
        }
    }
}
