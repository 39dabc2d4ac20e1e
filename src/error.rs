//! Error types for habla
//!
//! Only conditions a caller has to act on are represented here. Traversal-time
//! problems (permission errors, undecodable bytes, unclassifiable files) are
//! recovered inside the scanner and reported through [`crate::scanner::ScanObserver`].

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HablaError {
    /// The path handed to the scanner does not exist
    #[error("scan root not found: {}", path.display())]
    RootNotFound { path: PathBuf },

    /// An exclusion file was discovered but could not be read back
    #[error("exclusion file {} is unreadable: {}", path.display(), source)]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Configuration could not be loaded or extracted
    #[error("invalid configuration: {0}")]
    Config(#[from] Box<figment::Error>),
}

impl From<figment::Error> for HablaError {
    fn from(err: figment::Error) -> Self {
        HablaError::Config(Box::new(err))
    }
}
