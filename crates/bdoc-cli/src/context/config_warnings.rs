use bdoc_config::BdocConfig;

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &BdocConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &BdocConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    let mut warnings = Vec::new();

    if !config.registry.is_remote() && has_single_underscore_key(&env_keys, "BDOC_REGISTRY") {
        warnings.push(
            "Registry config appears default while BDOC_REGISTRY_* env vars exist. Use double underscores (example: BDOC_REGISTRY__BASE_URL)."
                .to_string(),
        );
    }

    if !config.metadata.is_configured() && has_single_underscore_key(&env_keys, "BDOC_METADATA") {
        warnings.push(
            "Metadata table is not configured while BDOC_METADATA_* env vars exist. Use double underscores (example: BDOC_METADATA__PATH)."
                .to_string(),
        );
    }

    if config.highlight.command.is_empty() && has_single_underscore_key(&env_keys, "BDOC_HIGHLIGHT")
    {
        warnings.push(
            "Highlight config appears default while BDOC_HIGHLIGHT_* env vars exist. Use double underscores (example: BDOC_HIGHLIGHT__TIMEOUT_MS)."
                .to_string(),
        );
    }

    warnings
}

/// `PREFIX_X` present but not `PREFIX__X`.
fn has_single_underscore_key(keys: &[String], prefix: &str) -> bool {
    let nested = format!("{prefix}__");
    let flat = format!("{prefix}_");
    keys.iter()
        .any(|key| key.starts_with(&flat) && !key.starts_with(&nested))
}
