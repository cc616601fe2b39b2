// Copyright (c) 2025 - Cowboy AI, Inc.
//! Hostname Validator
//!
//! Checks an explicitly supplied hostname. A blank name yields exactly one
//! error and nothing else runs; otherwise the prefix rule, the shape rule
//! and the uniqueness check are all evaluated and every problem is returned.

use std::sync::Arc;
use tracing::debug;

use super::uniqueness::UniquenessChecker;
use crate::domain::invariants::{conflict_errors, validate_naming, validate_not_blank};
use crate::domain::{NamingConvention, ValidationError};
use crate::errors::RegistryError;

pub struct HostnameValidator {
    checker: Arc<UniquenessChecker>,
    convention: NamingConvention,
}

impl HostnameValidator {
    pub fn new(checker: Arc<UniquenessChecker>) -> Self {
        Self {
            checker,
            convention: NamingConvention::default(),
        }
    }

    pub fn convention(mut self, convention: NamingConvention) -> Self {
        self.convention = convention;
        self
    }

    /// All problems with `hostname`, in rule order
    pub async fn validate(
        &self,
        hostname: Option<&str>,
    ) -> Result<Vec<ValidationError>, RegistryError> {
        if let Err(blank) = validate_not_blank(hostname) {
            return Ok(vec![blank]);
        }
        let hostname = hostname.unwrap_or_default();

        let mut errors = validate_naming(&self.convention, hostname);
        let conflicts = self.checker.check(hostname).await?;
        errors.extend(conflict_errors(hostname, &conflicts));

        debug!("Validated {}: {} problems", hostname, errors.len());
        Ok(errors)
    }
}
