use serde::de::DeserializeOwned;
use std::{io, path::Path, path::PathBuf};
use thiserror::Error;

/// Fatal errors raised while reading one of the input files.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed row in {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Reasons a single flow log line is skipped.
///
/// These never abort a run, the parser logs them and moves on.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("less than {expected} fields ({found} found)")]
    TooFewFields { found: usize, expected: usize },

    #[error("invalid destination port '{0}'")]
    InvalidDstPort(String),

    #[error("invalid protocol number '{0}'")]
    InvalidProtocol(String),
}

pub trait Parser {
    fn parse<T>(
        &self,
        file_path: &Path,
    ) -> Result<Box<dyn Iterator<Item = Result<T, ReadError>>>, ReadError>
    where
        T: DeserializeOwned + 'static;
}
