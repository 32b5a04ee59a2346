//! Import rewriting and target directory configuration.
//!
//! Defaults follow the shadcn-svelte layout: registry sources live under
//! `$lib/registry/...` while consumers import from `$lib/components`,
//! `$lib/hooks` and `$lib`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One import specifier prefix rewrite. `from` may contain `*` segments that
/// match exactly one path segment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ImportRule {
    pub from: String,
    pub to: String,
}

impl ImportRule {
    #[must_use]
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

fn default_import_rules() -> Vec<ImportRule> {
    vec![
        ImportRule::new("$lib/registry/ui/", "$lib/components/ui/"),
        ImportRule::new("$lib/registry/hooks/", "$lib/hooks/"),
        ImportRule::new("$lib/registry/lib/", "$lib/"),
        ImportRule::new("$lib/registry/blocks/*/components/", "$lib/components/"),
        ImportRule::new("$lib/registry/components/", "$lib/components/"),
    ]
}

fn default_target_dirs() -> BTreeMap<String, String> {
    [
        ("registry:ui", "components/ui"),
        ("registry:component", "components"),
        ("registry:hook", "hooks"),
        ("registry:lib", "lib"),
        ("registry:page", "routes"),
    ]
    .into_iter()
    .map(|(kind, dir)| (kind.to_string(), dir.to_string()))
    .collect()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TransformConfig {
    /// Ordered import prefix rewrites; the first matching rule wins.
    #[serde(default = "default_import_rules")]
    pub import_rules: Vec<ImportRule>,

    /// File type (`registry:*`) to destination directory. File types without
    /// an entry keep their declared target.
    #[serde(default = "default_target_dirs")]
    pub target_dirs: BTreeMap<String, String>,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            import_rules: default_import_rules(),
            target_dirs: default_target_dirs(),
        }
    }
}
