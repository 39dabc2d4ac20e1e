use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};

use crate::cli::Output;
use crate::config::HablaConfig;
use crate::scanner::Scanner;

#[derive(Args)]
pub struct CheckIgnoreArgs {
    /// Paths to check
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,

    /// Scan root the exclusion files are discovered from (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,
}

pub async fn execute(args: CheckIgnoreArgs, config_path: Option<&str>, output: &Output) -> Result<()> {
    let scanner_config = HablaConfig::load(config_path)?
        .scanner()
        .context("Failed to load scanner configuration")?;
    let scanner = Scanner::new(scanner_config);

    let root = match args.root {
        Some(root) => root,
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };
    let root = std::path::absolute(&root)
        .with_context(|| format!("Invalid root {}", root.display()))?;

    for path in &args.paths {
        let absolute = std::path::absolute(path)
            .with_context(|| format!("Invalid path {}", path.display()))?;
        if absolute.strip_prefix(&root).is_err() {
            output.warning(&format!("{} is outside {}", path.display(), root.display()));
            continue;
        }
        println!("{}", describe(&scanner, &root, &absolute, path));
    }

    Ok(())
}

fn describe(scanner: &Scanner, root: &Path, absolute: &Path, shown: &Path) -> String {
    let sources = scanner.sources_for(root, absolute);
    let rules = scanner.rule_set(&sources);
    match rules.explain(absolute, absolute.is_dir()) {
        Some(rule) if rule.is_negation() => format!("{}\tincluded by {}", shown.display(), rule),
        Some(rule) => format!("{}\texcluded by {}", shown.display(), rule),
        None => format!("{}\tincluded", shown.display()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_describe_names_deciding_rule() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join(".gitignore"), "*.log\n!keep.log\n").unwrap();

        let scanner = Scanner::default();
        let drop = describe(&scanner, root, &root.join("drop.log"), Path::new("drop.log"));
        let keep = describe(&scanner, root, &root.join("keep.log"), Path::new("keep.log"));
        let other = describe(&scanner, root, &root.join("main.rs"), Path::new("main.rs"));

        assert!(drop.starts_with("drop.log\texcluded by "));
        assert!(drop.ends_with(".gitignore:1: *.log"));
        assert!(keep.starts_with("keep.log\tincluded by "));
        assert!(keep.ends_with(".gitignore:2: !keep.log"));
        assert_eq!(other, "main.rs\tincluded");
    }
}
