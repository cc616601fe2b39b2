// Copyright (c) 2025 - Cowboy AI, Inc.
//! Pure Validation Functions - Hostname Invariants
//!
//! User-facing validation problems and the report that collects them.
//! Validation never stops at the first failure: every rule is evaluated and
//! the caller prints the whole [`ErrorReport`] before signalling failure.
//!
//! # Design Principles
//!
//! - **Pure Functions**: No I/O, deterministic
//! - **Accumulated**: Rules return lists, not the first error
//! - **Human Readable**: `Display` is the exact line shown to the operator

use std::fmt;
use std::path::PathBuf;

use super::conflict::Conflict;
use super::hostname::NamingConvention;

/// Validation result for single-rule checks
pub type ValidationResult = Result<(), ValidationError>;

/// A user-facing validation problem
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("hostname can't be blank")]
    Blank,

    #[error("hostname does not start with a valid prefix")]
    InvalidPrefix,

    #[error("hostname is not valid prefix followed by numbers")]
    NotPrefixFollowedByNumbers,

    /// The name is already used in some registry
    #[error("{hostname} in {conflict} already exists. Delete first.")]
    AlreadyExists { hostname: String, conflict: Conflict },

    #[error("Unable to find available hostname in {attempts} tries")]
    AllocationExhausted { attempts: usize },

    /// A prefix letter could not be derived from the allocation inputs
    #[error("cannot derive a hostname prefix from {field} '{value}'")]
    MissingPrefixSource { field: &'static str, value: String },

    #[error("You did not provide a valid '{0}' value.")]
    MissingCredential(String),

    #[error("You must provide a cluster tag")]
    MissingClusterTag,

    #[error("You must provide a region")]
    MissingRegion,

    #[error("Could not find validation key. Tried {}", .0.display())]
    MissingValidationKey(PathBuf),

    #[error("Could not find encrypted data bag secret. Tried {}", .0.display())]
    MissingSecretFile(PathBuf),

    #[error("You have not provided a valid image. Tried to find '{0}'.")]
    InvalidImage(String),
}

/// Ordered collection of validation problems
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorReport {
    errors: Vec<ValidationError>,
}

impl ErrorReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// `Ok(())` when nothing was collected, otherwise the report itself
    pub fn into_result(self) -> Result<(), ErrorReport> {
        if self.has_errors() {
            Err(self)
        } else {
            Ok(())
        }
    }
}

impl Extend<ValidationError> for ErrorReport {
    fn extend<T: IntoIterator<Item = ValidationError>>(&mut self, iter: T) {
        self.errors.extend(iter);
    }
}

impl From<Vec<ValidationError>> for ErrorReport {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }
}

impl IntoIterator for ErrorReport {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

/// A hostname must be present and non-empty
pub fn validate_not_blank(hostname: Option<&str>) -> ValidationResult {
    match hostname {
        Some(name) if !name.is_empty() => Ok(()),
        _ => Err(ValidationError::Blank),
    }
}

/// Naming-convention rules, each evaluated independently
pub fn validate_naming(convention: &NamingConvention, hostname: &str) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if !convention.starts_with_valid_prefix(hostname) {
        errors.push(ValidationError::InvalidPrefix);
    }
    if !NamingConvention::is_prefix_followed_by_numbers(hostname) {
        errors.push(ValidationError::NotPrefixFollowedByNumbers);
    }
    errors
}

/// One error per registry conflict, in conflict order
pub fn conflict_errors(hostname: &str, conflicts: &[Conflict]) -> Vec<ValidationError> {
    conflicts
        .iter()
        .map(|conflict| ValidationError::AlreadyExists {
            hostname: hostname.to_string(),
            conflict: conflict.clone(),
        })
        .collect()
}
