// Copyright (c) 2025 - Cowboy AI, Inc.
//! Registry conflicts
//!
//! A [`Conflict`] is an opaque reference to something already using a
//! candidate name in one of the naming registries. It exists for error
//! messages only; nothing inspects its contents beyond display.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The naming registries a candidate hostname is checked against
///
/// Declaration order is the order conflicts are reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistryKind {
    /// Configuration-management node directory
    Node,
    /// Configuration-management API client directory
    ApiClient,
    /// Compute instances tagged with `Name`
    Compute,
    /// DNS zone record sets
    Dns,
}

impl RegistryKind {
    /// All registries in reporting order
    pub const ALL: [RegistryKind; 4] = [
        RegistryKind::Node,
        RegistryKind::ApiClient,
        RegistryKind::Compute,
        RegistryKind::Dns,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RegistryKind::Node => "chef node",
            RegistryKind::ApiClient => "chef api client",
            RegistryKind::Compute => "compute instance",
            RegistryKind::Dns => "dns record",
        }
    }
}

impl fmt::Display for RegistryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An entity found in a registry under a candidate name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Conflict {
    /// Registry the entity was found in
    pub registry: RegistryKind,
    /// Registry-specific identifier (node name, instance id, record)
    pub resource: String,
}

impl Conflict {
    pub fn new(registry: RegistryKind, resource: impl Into<String>) -> Self {
        Self {
            registry,
            resource: resource.into(),
        }
    }
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.registry, self.resource)
    }
}
