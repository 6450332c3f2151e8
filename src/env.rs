use std::path::Path;

use anyhow::Context;
use tracing::info;

/// Layered environment loading: the base `.env`, then a profile overlay,
/// then local secrets. Later files override earlier ones; absent files are
/// skipped, malformed ones are an error.
pub fn load_environment() -> anyhow::Result<()> {
    let profile = dotenvy::var("ROCKET_PROFILE").unwrap_or_else(|_| "development".to_string());

    let overlay = format!("config/{}.env", profile);
    for env_file in [".env", overlay.as_str(), ".secrets.env"] {
        load_env_file(env_file)?;
    }

    Ok(())
}

fn load_env_file(path: &str) -> anyhow::Result<()> {
    if !Path::new(path).exists() {
        return Ok(());
    }

    dotenvy::from_filename_override(path)
        .with_context(|| format!("Failed to load environment file {}", path))?;
    info!("Loaded environment from: {}", path);
    Ok(())
}

pub fn database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite::memory:".to_string())
}
