// Copyright (c) 2025 - Cowboy AI, Inc.
//! Error types for hostname allocation and instance provisioning
//!
//! Registry lookups distinguish "not found" (an empty conflict list, never an
//! error) from infrastructure failures, which are the only thing a
//! [`RegistryError`] represents. User-facing problems are accumulated in an
//! [`ErrorReport`](crate::domain::ErrorReport) instead of aborting early.

use thiserror::Error;

use crate::bootstrap::BootstrapError;
use crate::domain::{DescriptorError, ErrorReport, RegistryKind};

/// Hard failure from an external naming registry
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Registry could not be reached or returned a server error
    #[error("{registry} registry unavailable: {message}")]
    Unavailable {
        registry: RegistryKind,
        message: String,
    },

    /// Credentials were rejected by the registry
    #[error("{registry} registry rejected credentials: {message}")]
    Unauthorized {
        registry: RegistryKind,
        message: String,
    },

    /// No hosted zone matches the configured DNS domain
    #[error("Could not find DNS zone for {0}")]
    ZoneNotFound(String),
}

impl RegistryError {
    /// Shorthand for an unavailable registry
    pub fn unavailable(registry: RegistryKind, message: impl Into<String>) -> Self {
        Self::Unavailable {
            registry,
            message: message.into(),
        }
    }
}

/// Failure reported by a cloud collaborator outside the registry lookups
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{operation} failed: {message}")]
pub struct CloudError {
    pub operation: String,
    pub message: String,
}

impl CloudError {
    pub fn new(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            message: message.into(),
        }
    }
}

/// Errors that can occur while preparing or launching an instance
#[derive(Debug, Error)]
pub enum ProvisionError {
    /// A registry failed hard during a uniqueness check
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Every collected validation problem, one per line
    #[error("Validation failed:\n{0}")]
    Validation(ErrorReport),

    /// Bootstrap payload could not be rendered
    #[error("Bootstrap error: {0}")]
    Bootstrap(#[from] BootstrapError),

    /// Descriptor was missing a required field
    #[error("Descriptor error: {0}")]
    Descriptor(#[from] DescriptorError),

    /// Server creation, readiness polling or DNS registration failed
    #[error("Cloud error: {0}")]
    Cloud(#[from] CloudError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for provisioning operations
pub type ProvisionResult<T> = Result<T, ProvisionError>;

impl From<serde_json::Error> for ProvisionError {
    fn from(err: serde_json::Error) -> Self {
        ProvisionError::Serialization(err.to_string())
    }
}
