//! Command implementations for the habla CLI
//!
//! Each command is organized into its own module.

pub mod check_ignore;
pub mod config;
pub mod scan;
pub mod version;
