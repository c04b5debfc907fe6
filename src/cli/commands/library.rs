//! Library folder command.

use std::path::Path;

use crate::config::{self, Config};

/// Print the library folder, or change it when `path` is given.
pub fn cmd_library(config: &mut Config, path: Option<&Path>) -> anyhow::Result<()> {
    let Some(path) = path else {
        println!("{}", config.library.location.display());
        return Ok(());
    };

    let location = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    if location.exists() && !location.is_dir() {
        eprintln!("✗ {} is not a folder", location.display());
        return Ok(());
    }

    config.library.location = location;
    match config::save(config) {
        Ok(()) => println!("✓ Library folder set to {}", config.library.location.display()),
        Err(e) => eprintln!("✗ Could not save settings: {}", e),
    }
    Ok(())
}
