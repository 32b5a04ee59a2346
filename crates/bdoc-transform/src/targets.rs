//! Target path resolution.

use std::collections::BTreeMap;

use bdoc_core::{FileType, ItemType};

use crate::error::TransformError;

/// Maps file kinds to the consumer directory they are placed in.
#[derive(Debug, Clone, Default)]
pub struct TargetResolver {
    dirs: BTreeMap<FileType, String>,
}

impl TargetResolver {
    pub fn new<I, D>(dirs: I) -> Self
    where
        I: IntoIterator<Item = (FileType, D)>,
        D: AsRef<str>,
    {
        let dirs = dirs
            .into_iter()
            .map(|(kind, dir)| (kind, dir.as_ref().trim_matches('/').to_string()))
            .collect();
        Self { dirs }
    }

    /// Build from `registry:*` keyed string pairs, as found in configuration.
    ///
    /// # Errors
    ///
    /// Returns `TransformError::UnknownFileType` if a key is not a file-level
    /// registry kind.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, TransformError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let dirs = pairs
            .into_iter()
            .map(|(kind, dir)| Ok((kind.parse::<FileType>()?, dir)))
            .collect::<Result<Vec<_>, TransformError>>()?;
        Ok(Self::new(dirs))
    }

    #[must_use]
    pub fn directory(&self, file_type: FileType) -> Option<&str> {
        self.dirs.get(&file_type).map(String::as_str)
    }

    /// Compute the consumer-side target for one file.
    ///
    /// `registry:ui` items are already laid out canonically and keep every
    /// target. Otherwise the file's base name is placed in the directory
    /// mapped to its kind; kinds without a directory keep their target.
    #[must_use]
    pub fn resolve(&self, item_type: ItemType, file_type: FileType, target: &str) -> String {
        if item_type == ItemType::Ui {
            return target.to_string();
        }
        let Some(dir) = self.directory(file_type) else {
            return target.to_string();
        };
        match base_name(target) {
            "" => target.to_string(),
            base => format!("{dir}/{base}"),
        }
    }
}

fn base_name(target: &str) -> &str {
    target.rsplit('/').next().unwrap_or(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn resolver() -> TargetResolver {
        TargetResolver::new([
            (FileType::Ui, "components/ui"),
            (FileType::Component, "components"),
            (FileType::Hook, "hooks"),
            (FileType::Lib, "lib"),
            (FileType::Page, "routes"),
        ])
    }

    #[rstest]
    #[case(FileType::Hook, "use-foo.ts", "hooks/use-foo.ts")]
    #[case(FileType::Component, "blocks/login-01/components/login-form.svelte", "components/login-form.svelte")]
    #[case(FileType::Lib, "src/lib/utils.ts", "lib/utils.ts")]
    #[case(FileType::Ui, "button.svelte", "components/ui/button.svelte")]
    #[case(FileType::Page, "blocks/login-01/+page.svelte", "routes/+page.svelte")]
    #[case(FileType::File, "static/robots.txt", "static/robots.txt")]
    #[case(FileType::Style, "app.css", "app.css")]
    fn block_item_remaps_by_file_type(
        #[case] file_type: FileType,
        #[case] target: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(resolver().resolve(ItemType::Block, file_type, target), expected);
    }

    #[rstest]
    #[case(FileType::Ui, "components/ui/button.svelte")]
    #[case(FileType::Hook, "somewhere/use-foo.ts")]
    fn ui_item_passes_through(#[case] file_type: FileType, #[case] target: &str) {
        assert_eq!(resolver().resolve(ItemType::Ui, file_type, target), target);
    }

    #[test]
    fn trailing_slash_target_is_kept() {
        assert_eq!(
            resolver().resolve(ItemType::Block, FileType::Hook, "hooks/"),
            "hooks/"
        );
    }

    #[test]
    fn directories_are_normalized() {
        let resolver = TargetResolver::new([(FileType::Hook, "/src/hooks/")]);
        assert_eq!(resolver.directory(FileType::Hook), Some("src/hooks"));
        assert_eq!(
            resolver.resolve(ItemType::Example, FileType::Hook, "use-x.ts"),
            "src/hooks/use-x.ts"
        );
    }

    #[test]
    fn from_pairs_rejects_item_only_kind() {
        let err = TargetResolver::from_pairs([("registry:block", "blocks")]).unwrap_err();
        assert!(matches!(err, TransformError::UnknownFileType(_)));
    }

    #[test]
    fn from_pairs_parses_wire_kinds() {
        let resolver = TargetResolver::from_pairs([("registry:hook", "hooks")]).unwrap();
        assert_eq!(resolver.directory(FileType::Hook), Some("hooks"));
        assert_eq!(resolver.directory(FileType::Lib), None);
    }
}
