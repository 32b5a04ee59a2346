//! # bdoc-transform
//!
//! Per-file rewriting of registry items for consumer projects:
//! - [`ImportRewriter`]: rewrites internal registry import specifiers to the
//!   paths a consuming project uses
//! - [`TargetResolver`]: computes where a consumer places each file
//! - [`FileTransformer`]: applies both to one file, independently of every
//!   other file in the item

mod error;
pub mod imports;
pub mod targets;

pub use error::TransformError;
pub use imports::ImportRewriter;
pub use targets::TargetResolver;

use bdoc_config::TransformConfig;
use bdoc_core::{FileType, ItemType, JsonMap, RegistryFile};

/// A registry file after import rewriting and target resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformedFile {
    pub target: String,
    pub file_type: FileType,
    pub content: String,
    pub extra: JsonMap,
}

/// Applies import rewriting and target resolution to registry files.
#[derive(Debug, Clone, Default)]
pub struct FileTransformer {
    imports: ImportRewriter,
    targets: TargetResolver,
}

impl FileTransformer {
    #[must_use]
    pub const fn new(imports: ImportRewriter, targets: TargetResolver) -> Self {
        Self { imports, targets }
    }

    /// Compile the configured rewrite rules and target directories.
    ///
    /// # Errors
    ///
    /// Returns a [`TransformError`] if a rule is malformed, the rule set is
    /// not idempotent, or a directory key is not a file-level kind.
    pub fn from_config(config: &TransformConfig) -> Result<Self, TransformError> {
        let imports = ImportRewriter::new(
            config
                .import_rules
                .iter()
                .map(|rule| (rule.from.as_str(), rule.to.as_str())),
        )?;
        let targets = TargetResolver::from_pairs(
            config
                .target_dirs
                .iter()
                .map(|(kind, dir)| (kind.as_str(), dir.as_str())),
        )?;
        Ok(Self::new(imports, targets))
    }

    #[must_use]
    pub const fn imports(&self) -> &ImportRewriter {
        &self.imports
    }

    /// Rewrite one file of an item of kind `item_type`.
    #[must_use]
    pub fn transform(&self, item_type: ItemType, file: RegistryFile) -> TransformedFile {
        let target = self
            .targets
            .resolve(item_type, file.file_type, &file.target);
        if target != file.target {
            tracing::trace!(from = %file.target, to = %target, "resolved target");
        }
        TransformedFile {
            content: self.imports.rewrite(&file.content),
            target,
            file_type: file.file_type,
            extra: file.extra,
        }
    }
}
