use std::collections::BTreeSet;

/// One parsed word of a raw query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryWord<'a> {
    pub text: &'a str,
    pub is_minus: bool,
    pub is_stop: bool,
}

/// Structured query: required (plus) and excluded (minus) terms.
/// Stop words never appear in either set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub plus_words: BTreeSet<String>,
    pub minus_words: BTreeSet<String>,
}

impl Query {
    pub fn new() -> Self {
        Query::default()
    }

    pub fn is_empty(&self) -> bool {
        self.plus_words.is_empty() && self.minus_words.is_empty()
    }
}
