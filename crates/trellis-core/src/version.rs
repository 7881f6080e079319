// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lenient semantic-version parsing for host and plugin version bounds.

use semver::Version;

use crate::error::TrellisError;

/// Parse a version string, accepting the short forms `3` and `3.1`.
///
/// Missing minor/patch components are filled with zero before strict
/// semver parsing, so pre-release ordering (`3.1.0-beta1 < 3.1.0`) follows
/// semver rules.
pub fn parse_version(input: &str) -> Result<Version, TrellisError> {
    let trimmed = input.trim().trim_start_matches('v');
    let (core, suffix) = match trimmed.find(['-', '+']) {
        Some(idx) => trimmed.split_at(idx),
        None => (trimmed, ""),
    };
    let padded = match core.matches('.').count() {
        0 => format!("{core}.0.0{suffix}"),
        1 => format!("{core}.0{suffix}"),
        _ => trimmed.to_string(),
    };
    Version::parse(&padded)
        .map_err(|e| TrellisError::Config(format!("invalid version `{input}`: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_forms_are_padded() {
        assert_eq!(parse_version("3").unwrap(), Version::new(3, 0, 0));
        assert_eq!(parse_version("3.1").unwrap(), Version::new(3, 1, 0));
        assert_eq!(parse_version("v3.1.4").unwrap(), Version::new(3, 1, 4));
    }

    #[test]
    fn pre_release_sorts_before_release() {
        let beta = parse_version("3.1-beta1").unwrap();
        assert_eq!(beta.to_string(), "3.1.0-beta1");
        assert!(beta < parse_version("3.1.0").unwrap());
    }

    #[test]
    fn ordering_is_numeric_not_lexical() {
        assert!(parse_version("3.10.0").unwrap() > parse_version("3.9.0").unwrap());
    }

    #[test]
    fn garbage_is_a_config_error() {
        let err = parse_version("three").unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains("three"));
    }
}
