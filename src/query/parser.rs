use std::sync::Arc;
use crate::analysis::filters::stopword::StopWordFilter;
use crate::analysis::tokenizer::{is_valid_word, split_words};
use crate::core::error::{Error, Result};
use crate::query::types::{Query, QueryWord};

/// Query parser for converting raw query strings into plus/minus term sets
///
/// Syntax:
/// - "cat dog" -> both required
/// - "cat -dog" -> cat required, dog excluded
/// - "-" / "--dog" -> InvalidQuery
#[derive(Debug, Clone)]
pub struct QueryParser {
    pub stop_words: Arc<StopWordFilter>,
}

impl QueryParser {
    pub fn new(stop_words: Arc<StopWordFilter>) -> Self {
        QueryParser { stop_words }
    }

    pub fn parse(&self, input: &str) -> Result<Query> {
        let mut query = Query::new();

        for word in split_words(input) {
            let query_word = self.parse_query_word(word)?;
            if query_word.is_stop {
                continue;
            }
            if query_word.is_minus {
                query.minus_words.insert(query_word.text.to_string());
            } else {
                query.plus_words.insert(query_word.text.to_string());
            }
        }

        Ok(query)
    }

    pub fn parse_query_word<'a>(&self, text: &'a str) -> Result<QueryWord<'a>> {
        let (word, is_minus) = match text.strip_prefix('-') {
            Some(rest) => (rest, true),
            None => (text, false),
        };

        if word.is_empty() || word.starts_with('-') || !is_valid_word(word) {
            return Err(Error::invalid_query(text));
        }

        Ok(QueryWord {
            text: word,
            is_minus,
            is_stop: self.stop_words.is_stop_word(word),
        })
    }
}
