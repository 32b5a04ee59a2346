//! Block identifier validation.

use crate::error::RegistryError;

/// Check that `id` is a relative, slash-separated identifier made of
/// `[A-Za-z0-9._-]` segments, none of which is `.` or `..`.
///
/// # Errors
///
/// Returns `RegistryError::InvalidIdentifier` describing the first problem.
pub fn validate_identifier(id: &str) -> Result<(), RegistryError> {
    let invalid = |reason| RegistryError::InvalidIdentifier {
        id: id.to_string(),
        reason,
    };

    if id.is_empty() {
        return Err(invalid("identifier is empty"));
    }
    if id.starts_with('/') {
        return Err(invalid("identifier must be relative"));
    }
    for segment in id.split('/') {
        match segment {
            "" => return Err(invalid("empty path segment")),
            "." | ".." => return Err(invalid("relative path segment")),
            _ => {}
        }
        if !segment
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.'))
        {
            return Err(invalid("only ASCII letters, digits, '-', '_' and '.' are allowed"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_block_names() {
        for id in ["sidebar-07", "login_01", "charts/area-chart", "v1.2"] {
            assert!(validate_identifier(id).is_ok(), "{id}");
        }
    }

    #[test]
    fn rejects_traversal_and_absolute() {
        for id in ["", "../x", "a/../b", "/abs", "./a", "a//b", "a/", "a b", "a\\b", "ü"] {
            assert!(
                matches!(
                    validate_identifier(id),
                    Err(RegistryError::InvalidIdentifier { .. })
                ),
                "{id:?} should be rejected"
            );
        }
    }
}
