//! Treatment code lookup.
//!
//! A code matches when the query is a case-insensitive substring of the
//! code or of its localized label. Matches are then ranked:
//! - exact code
//! - code prefix
//! - code substring
//! - label substring, by Jaro-Winkler similarity to the label

use std::cmp::Ordering;

use strsim::jaro_winkler;

use crate::data::ReferenceData;
use crate::models::TreatmentCode;

/// How a code matched the query. Lower sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchKind {
    ExactCode,
    CodePrefix,
    CodeSubstring,
    Label,
}

/// A single search hit.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeMatch<'a> {
    pub item: &'a TreatmentCode,
    /// Label shown for the hit in the active locale
    pub label: &'a str,
    pub kind: MatchKind,
    /// Similarity of query and label (0.0 - 1.0)
    pub similarity: f64,
}

/// Substring search over the catalog.
pub struct CodeSearch<'a> {
    data: &'a ReferenceData,
    limit: Option<usize>,
}

impl<'a> CodeSearch<'a> {
    /// Create an unlimited search over the catalog.
    pub fn new(data: &'a ReferenceData) -> Self {
        Self { data, limit: None }
    }

    /// Cap the number of results.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Codes matching the query, best first.
    ///
    /// A blank query returns nothing rather than the whole catalog.
    pub fn search(&self, query: &str, locale: &str) -> Vec<&'a TreatmentCode> {
        self.search_ranked(query, locale)
            .into_iter()
            .map(|m| m.item)
            .collect()
    }

    /// Like [`search`](Self::search) but keeps the match details.
    pub fn search_ranked(&self, query: &str, locale: &str) -> Vec<CodeMatch<'a>> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        let data: &'a ReferenceData = self.data;
        let mut matches: Vec<CodeMatch<'a>> = data
            .codes()
            .iter()
            .filter_map(|item| match_code(item, data.label(&item.code, locale), &query))
            .collect();

        // Stable sort keeps catalog order for equal matches. Similarity only
        // orders label hits.
        matches.sort_by(|a, b| {
            a.kind.cmp(&b.kind).then_with(|| match a.kind {
                MatchKind::Label => b
                    .similarity
                    .partial_cmp(&a.similarity)
                    .unwrap_or(Ordering::Equal),
                _ => Ordering::Equal,
            })
        });

        if let Some(limit) = self.limit {
            matches.truncate(limit);
        }
        matches
    }
}

fn match_code<'a>(item: &'a TreatmentCode, label: &'a str, query: &str) -> Option<CodeMatch<'a>> {
    let code_lower = item.code.to_lowercase();
    let label_lower = label.to_lowercase();

    let kind = if code_lower == query {
        MatchKind::ExactCode
    } else if code_lower.starts_with(query) {
        MatchKind::CodePrefix
    } else if code_lower.contains(query) {
        MatchKind::CodeSubstring
    } else if label_lower.contains(query) {
        MatchKind::Label
    } else {
        return None;
    };

    Some(CodeMatch {
        item,
        label,
        kind,
        similarity: jaro_winkler(query, &label_lower),
    })
}
