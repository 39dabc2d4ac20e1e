use figment::Figment;
use figment::providers::{Env, Format, Json, Toml, Yaml};
use std::path::Path;

use super::{ContextConfig, Settings};
use crate::error::HablaError;
use crate::scanner::ScannerConfig;

// Embed the default config at compile time
const DEFAULT_CONFIG: &str = include_str!("../../default-config.toml");

pub struct HablaConfig {
    figment: Figment,
}

impl HablaConfig {
    /// Load the layered configuration.
    ///
    /// With `custom_config` the user and repository files are skipped and that
    /// file is used instead; it must exist.
    pub fn load(custom_config: Option<&str>) -> Result<Self, HablaError> {
        tracing::trace!("CONFIG LOAD: Starting");

        let mut figment = Figment::new().merge(Toml::string(DEFAULT_CONFIG));

        if let Some(custom_path) = custom_config {
            if !Path::new(custom_path).is_file() {
                let message = format!("config file {custom_path} not found");
                return Err(figment::Error::from(message).into());
            }
            figment = Self::merge_file(figment, custom_path);
        } else {
            let user_base = Self::user_config_base_path();
            figment = figment
                .merge(Toml::file(format!("{user_base}.toml")))
                .merge(Json::file(format!("{user_base}.json")))
                .merge(Yaml::file(format!("{user_base}.yaml")))
                .merge(Yaml::file(format!("{user_base}.yml")))
                .merge(Toml::file("habla.toml"))
                .merge(Json::file("habla.json"))
                .merge(Yaml::file("habla.yaml"))
                .merge(Yaml::file("habla.yml"));
        }

        // Environment variables always have highest priority
        figment = figment.merge(Env::prefixed("HABLA_").split("__"));

        Ok(HablaConfig { figment })
    }

    /// Only the embedded defaults
    pub fn defaults() -> Self {
        HablaConfig {
            figment: Figment::new().merge(Toml::string(DEFAULT_CONFIG)),
        }
    }

    pub fn settings(&self) -> Result<Settings, HablaError> {
        Ok(self.figment.extract()?)
    }

    pub fn scanner(&self) -> Result<ScannerConfig, HablaError> {
        Ok(self.figment.extract_inner("scanner")?)
    }

    pub fn context(&self) -> Result<ContextConfig, HablaError> {
        Ok(self.figment.extract_inner("context")?)
    }

    /// Get a nested object/section as JSON
    pub fn get_section(&self, path: &str) -> Result<serde_json::Value, HablaError> {
        Ok(self.figment.extract_inner(path)?)
    }

    fn merge_file(figment: Figment, path: &str) -> Figment {
        match Path::new(path).extension().and_then(|ext| ext.to_str()) {
            Some("json") => figment.merge(Json::file(path)),
            Some("yaml") | Some("yml") => figment.merge(Yaml::file(path)),
            _ => figment.merge(Toml::file(path)),
        }
    }

    fn user_config_base_path() -> String {
        match std::env::var("HOME") {
            Ok(home) => format!("{}/.config/habla/config", home),
            Err(_) => "~/.config/habla/config".to_string(),
        }
    }
}
