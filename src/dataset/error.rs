use std::path::PathBuf;
use thiserror::Error;
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("csv error in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("{path} ends before the column header on line {line}")]
    MissingHeader { path: PathBuf, line: usize },
    #[error("folder name `{0}` is not <prefix><subject>-<session>-<day>")]
    FolderName(String),
    #[error("subject `{0}` not found")]
    UnknownSubject(String),
    #[error("session/day `{session_day}` not found for subject `{subject}`")]
    UnknownSessionDay { subject: String, session_day: String },
    #[error("trial {trial} not found for {key}")]
    UnknownTrial { key: String, trial: usize },
    #[error(transparent)]
    Recording(#[from] crate::exg::ExgError),
}
impl DatasetError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DatasetError::Io {
            path: path.into(),
            source,
        }
    }
}
