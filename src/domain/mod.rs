// Copyright (c) 2025 - Cowboy AI, Inc.
//! Hostname Domain Models
//!
//! Value objects shared by the registries, the allocator/validator and the
//! bootstrap generator.
//!
//! - [`NamingConvention`] - convention-based hostname rules
//! - [`Conflict`] / [`RegistryKind`] - a name already in use, and where
//! - [`ValidationError`] / [`ErrorReport`] - accumulated user-facing problems
//! - [`BootstrapDescriptor`] - first-boot identity of a new instance
//! - [`ServerDefinition`] - server creation request

pub mod conflict;
pub mod descriptor;
pub mod hostname;
pub mod invariants;
pub mod server;

pub use conflict::{Conflict, RegistryKind};
pub use descriptor::{BootstrapDescriptor, BootstrapDescriptorBuilder, DescriptorError, RunList};
pub use hostname::{absolute, canonical_domain, fqdn, is_fully_qualified, NamingConvention, NUMBER_SPACE};
pub use invariants::{ErrorReport, ValidationError, ValidationResult};
pub use server::{ServerDefinition, ServerSummary, ENVIRONMENT_TAG, NAME_TAG};
