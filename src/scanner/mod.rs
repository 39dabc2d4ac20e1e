//! Recursive content scanner
//!
//! Walks a file or directory tree up to a depth budget, filters entries through
//! the exclusion rules active at each level, and folds every human-readable
//! file into a single delimited context buffer.

pub mod core;
pub mod observer;
pub mod text_detection;
pub mod types;

pub use core::Scanner;
pub use observer::{NoopObserver, ScanObserver, SkipReason, StatsObserver, TracingObserver};
pub use text_detection::{ContentClass, TextEncoding};
pub use types::{ScanResult, ScanStats, ScannerConfig};
