//! Record name validation
//!
//! Tar stores names as paths. The `tar` crate normalises `./`, repeated and
//! trailing slashes, and refuses absolute or `..` paths, so only names that
//! survive that encoding unchanged are accepted as keys.

use crate::error::{Result, StoreError};

/// Check that `name` is stored verbatim in a tar header
pub fn validate_name(name: &str) -> Result<()> {
    let reason = if name.is_empty() {
        Some("key must not be empty")
    } else if name.contains('\0') {
        Some("key must not contain NUL bytes")
    } else if name.starts_with('/') {
        Some("key must not be an absolute path")
    } else if name.ends_with('/') {
        Some("key must not end with '/'")
    } else if name
        .split('/')
        .any(|part| part.is_empty() || part == "." || part == "..")
    {
        Some("key must not contain empty, '.' or '..' path components")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(StoreError::InvalidKey {
            key: name.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_and_nested_names() {
        assert!(validate_name("key").is_ok());
        assert!(validate_name("users/42/profile").is_ok());
        assert!(validate_name("with space.and-dots..txt").is_ok());
        assert!(validate_name(&"x".repeat(300)).is_ok());
    }

    #[test]
    fn rejects_names_tar_would_rewrite() {
        for bad in ["", "/abs", "dir/", "a//b", "./a", "a/./b", "../up", "a/..", "nul\0"] {
            let err = validate_name(bad).unwrap_err();
            assert!(
                matches!(err, StoreError::InvalidKey { .. }),
                "{:?} gave {:?}",
                bad,
                err
            );
        }
    }
}
