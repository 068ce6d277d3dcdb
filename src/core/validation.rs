//! Input validation for secret-sync operations.
//!
//! Validates secret names, repository references and name lists before any
//! platform call is made.

use crate::core::types::{RepositoryRef, SecretName};
use crate::error::ValidationError;

/// Validate a secret name.
///
/// Names must be non-empty and contain only `A-Z`, `0-9` and underscore.
///
/// # Errors
///
/// Returns `ValidationError` if the name is empty or has other characters.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }

    for (i, ch) in name.chars().enumerate() {
        if !ch.is_ascii_uppercase() && !ch.is_ascii_digit() && ch != '_' {
            return Err(ValidationError::InvalidName {
                name: name.to_string(),
                reason: format!(
                    "invalid character '{}' at position {}. Only A-Z, 0-9, and underscore are allowed",
                    ch,
                    i + 1
                ),
            });
        }
    }

    Ok(())
}

/// Parse an `org/name` repository reference.
///
/// Surrounding whitespace is ignored. Both parts must be non-empty and may
/// only contain alphanumerics, `-`, `_` and `.`.
///
/// # Errors
///
/// Returns `ValidationError::EmptyTarget` for blank input and
/// `ValidationError::InvalidRepository` for anything not shaped `org/name`.
pub fn parse_repository(input: &str) -> Result<RepositoryRef, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyTarget);
    }

    let invalid = || ValidationError::InvalidRepository {
        repo: trimmed.to_string(),
    };

    let (org, name) = trimmed.split_once('/').ok_or_else(invalid)?;
    if !is_repo_segment(org) || !is_repo_segment(name) {
        return Err(invalid());
    }

    Ok(RepositoryRef::new(org, name))
}

fn is_repo_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

/// Parse a whitespace- or comma-delimited list of secret names.
///
/// Order is preserved and repeated names are dropped after their first
/// occurrence.
///
/// # Errors
///
/// Returns `ValidationError::EmptyNameList` when nothing remains after
/// trimming, or the first invalid name's error.
pub fn parse_name_list(input: &str) -> Result<Vec<SecretName>, ValidationError> {
    collect_names(input.split(|c: char| c == ',' || c.is_whitespace()))
}

/// Validate names given as separate arguments. Each argument may itself be
/// a delimited list.
///
/// # Errors
///
/// Same as [`parse_name_list`].
pub fn parse_name_args<S: AsRef<str>>(args: &[S]) -> Result<Vec<SecretName>, ValidationError> {
    collect_names(
        args.iter()
            .flat_map(|a| a.as_ref().split(|c: char| c == ',' || c.is_whitespace())),
    )
}

fn collect_names<'a>(
    parts: impl Iterator<Item = &'a str>,
) -> Result<Vec<SecretName>, ValidationError> {
    let mut names: Vec<SecretName> = Vec::new();
    for part in parts.map(str::trim).filter(|p| !p.is_empty()) {
        let name = SecretName::new(part)?;
        if !names.contains(&name) {
            names.push(name);
        }
    }

    if names.is_empty() {
        return Err(ValidationError::EmptyNameList);
    }

    Ok(names)
}
