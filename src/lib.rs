//! # habla - project context for language models
//!
//! habla walks a project tree and assembles every human-readable file into a
//! single delimited text blob, ready to be placed in a prompt. Which files are
//! read is decided by gitignore-style exclusion files discovered at every
//! directory level, plus built-in rules for version control metadata and
//! dependency lock files.
//!
//! ## Quick Start
//!
//! ```bash
//! # Print the context of the current project, three levels deep
//! habla scan -d 3
//!
//! # Explain why a file is or is not part of the context
//! habla check-ignore target/debug/app
//! ```
//!
//! ## Library use
//!
//! ```no_run
//! use habla::scanner::{Scanner, ScannerConfig};
//!
//! let scanner = Scanner::new(ScannerConfig::default());
//! let result = scanner.scan_path(std::path::Path::new("."), 10)?;
//! println!("{} characters", result.total_characters);
//! # Ok::<(), habla::HablaError>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod ignore;
pub mod scanner;

pub use cli::{Cli, Output};
pub use config::HablaConfig;
pub use error::HablaError;

/// Result type alias for application-level operations
pub type Result<T> = anyhow::Result<T>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
