use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Negative id, or an id that is already live
    InvalidDocument,
    /// Control character inside a document or query word
    InvalidWord,
    /// Malformed query word (`-`, `--word`, empty)
    InvalidQuery,
    /// Operation on an id that is not live
    UnknownDocument,
    InvalidArgument,
    Parse,
    Internal,
}

#[derive(Debug, Clone)]
pub struct Error {
    pub kind: ErrorKind,
    pub context: String,
}

impl Error {
    pub fn new(kind: ErrorKind, context: String) -> Self {
        Error { kind, context }
    }

    pub fn invalid_document(id: i64, reason: &str) -> Self {
        Error::new(ErrorKind::InvalidDocument, format!("Document id {} {}", id, reason))
    }

    pub fn invalid_word(word: &str) -> Self {
        Error::new(ErrorKind::InvalidWord, format!("Word {:?} contains control characters", word))
    }

    pub fn invalid_query(word: &str) -> Self {
        Error::new(ErrorKind::InvalidQuery, format!("Query word {:?} is invalid", word))
    }

    pub fn unknown_document(id: i64) -> Self {
        Error::new(ErrorKind::UnknownDocument, format!("Document {} not found", id))
    }

    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.context)
    }
}

impl std::error::Error for Error {}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error {
            kind: ErrorKind::Parse,
            context: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
