//! # bdoc-config
//!
//! Layered configuration loading for bdoc using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`BDOC_*` prefix, `__` as separator)
//! 2. An explicit config file passed by the caller (`bdoc --config <path>`)
//! 3. Project-level `.bdoc/config.toml`
//! 4. User-level `~/.config/bdoc/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `BDOC_HIGHLIGHT__TIMEOUT_MS` -> `highlight.timeout_ms`,
//! `BDOC_REGISTRY__BASE_URL` -> `registry.base_url`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use bdoc_config::BdocConfig;
//!
//! let config = BdocConfig::load_with_dotenv().expect("config");
//! if config.registry.is_remote() {
//!     println!("registry: {}", config.registry.base_url);
//! }
//! ```

mod error;
mod highlight;
mod metadata;
mod registry;
mod transform;

pub use error::ConfigError;
pub use highlight::HighlightConfig;
pub use metadata::MetadataConfig;
pub use registry::RegistryConfig;
pub use transform::{ImportRule, TransformConfig};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BdocConfig {
    #[serde(default)]
    pub registry: RegistryConfig,
    #[serde(default)]
    pub highlight: HighlightConfig,
    #[serde(default)]
    pub transform: TransformConfig,
    #[serde(default)]
    pub metadata: MetadataConfig,
}

impl BdocConfig {
    /// Load configuration from all sources (TOML files + environment variables)
    /// and validate it.
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if a source cannot be parsed, or
    /// `ConfigError::InvalidValue` if validation fails.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Like [`Self::load`], with an extra TOML file layered above the
    /// project-level config.
    ///
    /// # Errors
    ///
    /// See [`Self::load`].
    pub fn load_from(extra: Option<&Path>) -> Result<Self, ConfigError> {
        let config: Self = Self::figment_with(extra).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// See [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain without an explicit file.
    ///
    /// Public so tests can inspect the figment directly or add providers.
    #[must_use]
    pub fn figment() -> Figment {
        Self::figment_with(None)
    }

    fn figment_with(extra: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".bdoc/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Explicit file
        if let Some(path) = extra {
            figment = figment.merge(Toml::file(path));
        }

        // Layer 4: Environment variables (highest priority)
        figment.merge(Env::prefixed("BDOC_").split("__"))
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("bdoc").join("config.toml"))
    }

    /// Check value ranges and rule shapes.
    ///
    /// Semantic checks that need the typed model (known file kinds, rule
    /// idempotence) happen where the rules are compiled, in `bdoc-transform`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.highlight.timeout_ms == 0 {
            return Err(ConfigError::invalid(
                "highlight.timeout_ms",
                "must be greater than zero",
            ));
        }
        if self.highlight.max_concurrency == 0 {
            return Err(ConfigError::invalid(
                "highlight.max_concurrency",
                "must be greater than zero",
            ));
        }
        if self.registry.is_remote() && self.registry.request_timeout_secs == 0 {
            return Err(ConfigError::invalid(
                "registry.request_timeout_secs",
                "must be greater than zero",
            ));
        }
        for (idx, rule) in self.transform.import_rules.iter().enumerate() {
            let field = format!("transform.import_rules[{idx}]");
            if !rule.from.ends_with('/') || !rule.to.ends_with('/') {
                return Err(ConfigError::invalid(
                    field,
                    "`from` and `to` must be directory prefixes ending in '/'",
                ));
            }
            if rule.from.len() < 2 || rule.to.is_empty() {
                return Err(ConfigError::invalid(field, "prefixes must not be empty"));
            }
            if rule.to.contains('*') {
                return Err(ConfigError::invalid(field, "`to` must not contain '*'"));
            }
        }
        for (kind, dir) in &self.transform.target_dirs {
            if dir.trim_matches('/').is_empty() {
                return Err(ConfigError::invalid(
                    format!("transform.target_dirs.{kind}"),
                    "directory must not be empty",
                ));
            }
        }
        Ok(())
    }
}
