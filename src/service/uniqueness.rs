// Copyright (c) 2025 - Cowboy AI, Inc.
//! Uniqueness Checker
//!
//! Fans a candidate name out to every registry probe and concatenates the
//! results in a fixed order: node, api client, compute, DNS.
//!
//! All probes are queried even when an earlier one reports a conflict, so a
//! single pass yields the complete list for validation messages. Probes run
//! concurrently; a hard failure from any of them aborts the pass.

use futures::future::try_join_all;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::{Conflict, RegistryKind};
use crate::errors::RegistryError;
use crate::registry::RegistryProbe;

pub struct UniquenessChecker {
    probes: Vec<Arc<dyn RegistryProbe>>,
}

impl UniquenessChecker {
    /// Checker over the four registries in reporting order
    pub fn new(
        node: Arc<dyn RegistryProbe>,
        api_client: Arc<dyn RegistryProbe>,
        compute: Arc<dyn RegistryProbe>,
        dns: Arc<dyn RegistryProbe>,
    ) -> Self {
        Self {
            probes: vec![node, api_client, compute, dns],
        }
    }

    /// Checker over an arbitrary probe list, merged in list order
    pub fn from_probes(probes: Vec<Arc<dyn RegistryProbe>>) -> Self {
        Self { probes }
    }

    pub fn registries(&self) -> Vec<RegistryKind> {
        self.probes.iter().map(|probe| probe.kind()).collect()
    }

    /// Every conflict for `name` across all registries
    pub async fn check(&self, name: &str) -> Result<Vec<Conflict>, RegistryError> {
        let results = try_join_all(self.probes.iter().map(|probe| probe.lookup(name))).await?;
        let conflicts: Vec<Conflict> = results.into_iter().flatten().collect();

        if conflicts.is_empty() {
            debug!("{} is free in {} registries", name, self.probes.len());
        } else {
            warn!("{} already in use: {} conflicts", name, conflicts.len());
        }
        Ok(conflicts)
    }

    /// `true` when no registry knows the name
    pub async fn is_available(&self, name: &str) -> Result<bool, RegistryError> {
        Ok(self.check(name).await?.is_empty())
    }
}
