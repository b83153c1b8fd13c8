//! Error enum
use std::fmt;

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Avro(avro_rs::Error),
    Serde(serde_json::Error),
    /// Required corpus files are absent from the dataset directory.
    MissingInputs(Vec<String>),
    /// A corpus file does not hold the expected number of lines.
    CorpusLength {
        file: String,
        expected: usize,
        found: usize,
    },
    /// A split index points past the end of the loaded corpus.
    IndexOutOfRange { index: usize, len: usize },
    /// A frame stream ended in the middle of a frame.
    Corruption { offset: u64, reason: String },
    /// A frame payload is not a valid structured record.
    Record(String),
    Config(String),
    Custom(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "io error: {}", e),
            Error::Avro(e) => write!(f, "avro error: {}", e),
            Error::Serde(e) => write!(f, "json error: {}", e),
            Error::MissingInputs(files) => write!(
                f,
                "dataset directory does not contain all the tokenized files (missing: {})",
                files.join(", ")
            ),
            Error::CorpusLength {
                file,
                expected,
                found,
            } => write!(
                f,
                "{} has {} lines, expected {}",
                file, found, expected
            ),
            Error::IndexOutOfRange { index, len } => {
                write!(f, "index {} out of range for corpus of {} items", index, len)
            }
            Error::Corruption { offset, reason } => {
                write!(f, "corrupted frame stream at byte {}: {}", offset, reason)
            }
            Error::Record(msg) => write!(f, "invalid record: {}", msg),
            Error::Config(msg) => write!(f, "invalid configuration: {}", msg),
            Error::Custom(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::Io(e)
    }
}

impl From<avro_rs::Error> for Error {
    fn from(v: avro_rs::Error) -> Self {
        Self::Avro(v)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Error {
        Error::Serde(e)
    }
}

impl From<glob::GlobError> for Error {
    fn from(e: glob::GlobError) -> Error {
        Error::Custom(e.to_string())
    }
}

impl From<glob::PatternError> for Error {
    fn from(e: glob::PatternError) -> Error {
        Error::Custom(e.to_string())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Error {
        Error::Custom(s)
    }
}
