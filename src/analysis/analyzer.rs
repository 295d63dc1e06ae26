use std::sync::Arc;
use crate::analysis::filters::stopword::StopWordFilter;
use crate::analysis::tokenizer::{is_valid_word, split_words};
use crate::core::error::{Error, Result};

/// Text analysis pipeline: split, validate, drop stop words
#[derive(Debug, Clone)]
pub struct Analyzer {
    pub stop_words: Arc<StopWordFilter>,
}

impl Analyzer {
    pub fn new(stop_words: Arc<StopWordFilter>) -> Self {
        Analyzer { stop_words }
    }

    /// Fails on the first invalid word; nothing is returned for a partially valid text.
    pub fn analyze<'a>(&self, text: &'a str) -> Result<Vec<&'a str>> {
        let words = split_words(text);

        if let Some(bad) = words.iter().find(|word| !is_valid_word(word)) {
            return Err(Error::invalid_word(bad));
        }

        Ok(self.stop_words.filter(words))
    }
}
