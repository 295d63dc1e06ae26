use std::collections::BTreeSet;
use crate::analysis::tokenizer::is_valid_word;
use crate::core::error::{Error, ErrorKind, Result};

#[derive(Debug, Clone, Default)]
pub struct StopWordFilter {
    pub stop_words: BTreeSet<String>,
}

impl StopWordFilter {
    /// Empty strings are dropped and duplicates collapse.
    pub fn new<I, S>(stop_words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let stop_words: BTreeSet<String> = stop_words
            .into_iter()
            .map(Into::into)
            .filter(|word: &String| !word.is_empty())
            .collect();

        if let Some(bad) = stop_words.iter().find(|word| !is_valid_word(word)) {
            return Err(Error::new(
                ErrorKind::InvalidArgument,
                format!("Stop word {:?} contains control characters", bad),
            ));
        }

        Ok(StopWordFilter { stop_words })
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    pub fn filter<'a>(&self, words: Vec<&'a str>) -> Vec<&'a str> {
        words.into_iter()
            .filter(|word| !self.is_stop_word(word))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.stop_words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stop_words.is_empty()
    }
}
