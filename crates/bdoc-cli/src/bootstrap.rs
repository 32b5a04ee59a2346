use anyhow::Context;
use bdoc_config::BdocConfig;

use crate::cli::GlobalFlags;

/// Load `.env` from the working directory, then the layered configuration.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<BdocConfig> {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded dotenv file"),
        Err(error) if error.not_found() => {}
        Err(error) => return Err(error).context("failed to load .env file"),
    }

    BdocConfig::load_from(flags.config.as_deref()).with_context(|| match &flags.config {
        Some(path) => format!("failed to load configuration (extra file {})", path.display()),
        None => "failed to load configuration".to_string(),
    })
}
