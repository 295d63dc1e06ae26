use serde::{Serialize, Deserialize};
use crate::analysis::tokenizer::split_words;
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::types::DocumentStatus;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub stop_words: Vec<String>,

    // Ranking
    pub max_result_count: usize,                // K of the top-K selection
    pub relevance_epsilon: f64,                 // Relevances closer than this tie on rating
    pub default_status: DocumentStatus,         // Status used by the no-predicate query form

    // Parallel scoring
    pub accumulator_shards: usize,              // Lock shards of the relevance accumulator
    pub worker_threads: usize,                  // Size of the scoring pool

    // Request history
    pub request_history_capacity: usize,        // Requests remembered by RequestQueue
}

impl Default for Config {
    fn default() -> Self {
        Config {
            stop_words: Vec::new(),
            max_result_count: 5,
            relevance_epsilon: 1e-6,
            default_status: DocumentStatus::Active,
            accumulator_shards: 16,
            worker_threads: num_cpus::get(),
            request_history_capacity: 1440,             // One request per minute for a day
        }
    }
}

impl Config {
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Stop words given as one space-separated string
    pub fn with_stop_words_text(mut self, text: &str) -> Self {
        self.stop_words = split_words(text).into_iter().map(String::from).collect();
        self
    }

    pub fn with_stop_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stop_words = words.into_iter().map(Into::into).collect();
        self
    }

    pub fn validate(&self) -> Result<()> {
        let checks = [
            (self.max_result_count == 0, "max_result_count must be positive"),
            (self.accumulator_shards == 0, "accumulator_shards must be positive"),
            (self.worker_threads == 0, "worker_threads must be positive"),
            (self.request_history_capacity == 0, "request_history_capacity must be positive"),
            (
                !self.relevance_epsilon.is_finite() || self.relevance_epsilon < 0.0,
                "relevance_epsilon must be a finite non-negative number",
            ),
        ];

        match checks.iter().find(|(failed, _)| *failed) {
            Some((_, message)) => Err(Error::new(ErrorKind::InvalidArgument, message.to_string())),
            None => Ok(()),
        }
    }
}
