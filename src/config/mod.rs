//! Configuration management for habla
//!
//! Settings are layered with figment: embedded defaults, the user config, the
//! repository config (or an explicit `--config` file), then `HABLA_*`
//! environment variables.

mod core;

use serde::{Deserialize, Serialize};

use crate::scanner::ScannerConfig;

pub use core::HablaConfig;

/// Fully resolved settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub scanner: ScannerConfig,

    #[serde(default)]
    pub context: ContextConfig,
}

/// Limits on the assembled context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    /// Largest context, in characters, the downstream prompt accepts
    pub max_characters: usize,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            max_characters: 80_000,
        }
    }
}
