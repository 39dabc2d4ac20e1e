//! Version command implementation

use crate::cli::Output;
use anyhow::Result;

/// Execute the version command
pub async fn execute(output: &Output) -> Result<()> {
    let version = env!("CARGO_PKG_VERSION");
    let name = env!("CARGO_PKG_NAME");
    let description = env!("CARGO_PKG_DESCRIPTION");

    println!("{name} {version}");

    output.blank_line();
    output.category("About");
    output.key_value("Description:", description);
    output.blank_line();

    output.category("Build Information");
    output.key_value("Rust edition:", "2024");
    output.key_value("Target:", std::env::consts::ARCH);
    output.key_value(
        "Profile:",
        if cfg!(debug_assertions) { "debug" } else { "release" },
    );

    Ok(())
}
