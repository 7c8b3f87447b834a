//! Configuration commands.
//!
//! - `config show`: Display the effective configuration
//! - `config path`: Print the config file location

use owo_colors::OwoColorize;
use serde_json::json;

use super::print_json;
use crate::config::Config;
use crate::error::Result;

/// Show the effective configuration (file, then environment overrides)
pub fn cmd_config_show(json: bool) -> Result<()> {
    let config = Config::load()?;
    let path = Config::config_path()?;

    if json {
        return print_json(&json!({
            "config_file": path.to_string_lossy(),
            "config_file_exists": path.exists(),
            "settings": config,
        }));
    }

    println!("{}\n", "Configuration:".cyan().bold());
    println!("  api_base_url: {}", config.api_base_url);
    println!("  image_base_url: {}", config.image_base_url);
    println!("  page_size: {}", config.page_size);
    println!("  max_count: {}", config.max_count);
    println!("  batch_concurrency: {}", config.batch_concurrency);
    println!("  timeout_secs: {}", config.timeout_secs);

    let source = if path.exists() {
        path.display().to_string()
    } else {
        format!("{} {}", path.display(), "(not present, using defaults)".dimmed())
    };
    println!("\n{}: {}", "config_file".cyan(), source);

    Ok(())
}

/// Print the config file path
pub fn cmd_config_path() -> Result<()> {
    println!("{}", Config::config_path()?.display());
    Ok(())
}
