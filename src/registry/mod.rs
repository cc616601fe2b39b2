// Copyright (c) 2025 - Cowboy AI, Inc.

//! Registry Probes
//!
//! A probe asks one naming registry whether a candidate hostname is already
//! in use. All four registries share one contract so the uniqueness checker
//! can treat them uniformly:
//!
//! - an empty result means the name is free in that registry
//! - "not found" from the backing service is never an error
//! - only infrastructure or authorization failures return `Err`
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use zest_instance::adapters::memory::InMemoryChef;
//! use zest_instance::registry::{NodeProbe, RegistryProbe};
//!
//! # tokio_test::block_on(async {
//! let chef = Arc::new(InMemoryChef::new());
//! chef.add_node("d999", None).await;
//!
//! let probe = NodeProbe::new(chef);
//! assert_eq!(probe.lookup("d999").await.unwrap().len(), 1);
//! assert!(probe.lookup("d998").await.unwrap().is_empty());
//! # });
//! ```

pub mod compute;
pub mod directory;
pub mod dns;

pub use compute::ComputeTagProbe;
pub use directory::{ApiClientProbe, NodeProbe};
pub use dns::{DnsRecordProbe, ZoneResolver};

use async_trait::async_trait;

use crate::domain::{Conflict, RegistryKind};
use crate::errors::RegistryError;

/// Lookup of a candidate name in a single registry
#[async_trait]
pub trait RegistryProbe: Send + Sync {
    /// Registry this probe queries
    fn kind(&self) -> RegistryKind;

    /// Every entity registered under `name`; empty when the name is free
    async fn lookup(&self, name: &str) -> Result<Vec<Conflict>, RegistryError>;
}
