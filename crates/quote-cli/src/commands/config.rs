//! Configuration command

use std::path::Path;

use anyhow::Result;
use quote_core::config::default_config_path;
use quote_core::QuoteConfig;

/// Show the effective configuration and where it came from
pub fn cmd_config(explicit: Option<&Path>, config: &QuoteConfig) -> Result<()> {
    let source = match explicit {
        Some(path) => path.display().to_string(),
        None => match default_config_path() {
            Some(path) if path.exists() => path.display().to_string(),
            Some(path) => format!("built-in defaults (override: {})", path.display()),
            None => "built-in defaults".to_string(),
        },
    };

    println!("Config source: {}", source);
    println!("{}", "─".repeat(50));
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}
