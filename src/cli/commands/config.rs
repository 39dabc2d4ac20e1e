use anyhow::{Context, Result};
use clap::{Args, Subcommand, ValueEnum};

use crate::cli::Output;
use crate::config::HablaConfig;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the merged configuration
    Show {
        /// Output format
        #[arg(long, value_enum, default_value = "toml")]
        format: ConfigFormat,
    },
    /// Check that the configuration loads
    Validate,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ConfigFormat {
    Toml,
    Json,
}

pub async fn execute(args: ConfigArgs, config_path: Option<&str>, output: &Output) -> Result<()> {
    let settings = HablaConfig::load(config_path)?
        .settings()
        .context("Failed to load configuration")?;

    match args.command {
        ConfigCommands::Show { format } => {
            let rendered = match format {
                ConfigFormat::Toml => toml::to_string_pretty(&settings)?,
                ConfigFormat::Json => serde_json::to_string_pretty(&settings)?,
            };
            println!("{rendered}");
        }
        ConfigCommands::Validate => {
            output.success("Configuration is valid");
        }
    }

    Ok(())
}
