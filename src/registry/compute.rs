// Copyright (c) 2025 - Cowboy AI, Inc.
//! Compute instance tag probe
//!
//! Instances are named through their `Name` tag. The probe queries every
//! region concurrently and returns the union of all matches, so a name used
//! in two regions yields two conflicts.

use async_trait::async_trait;
use futures::future::try_join_all;
use std::sync::Arc;
use tracing::debug;

use super::RegistryProbe;
use crate::adapters::ComputeInventory;
use crate::domain::{Conflict, RegistryKind, NAME_TAG};
use crate::errors::RegistryError;

pub struct ComputeTagProbe {
    inventory: Arc<dyn ComputeInventory>,
    regions: Vec<String>,
}

impl ComputeTagProbe {
    /// Probe every region the inventory reports
    pub fn new(inventory: Arc<dyn ComputeInventory>) -> Self {
        Self {
            inventory,
            regions: Vec::new(),
        }
    }

    /// Probe a fixed set of regions instead of asking the inventory
    pub fn with_regions(inventory: Arc<dyn ComputeInventory>, regions: Vec<String>) -> Self {
        Self { inventory, regions }
    }

    async fn regions(&self) -> Result<Vec<String>, RegistryError> {
        if self.regions.is_empty() {
            self.inventory.regions().await
        } else {
            Ok(self.regions.clone())
        }
    }
}

#[async_trait]
impl RegistryProbe for ComputeTagProbe {
    fn kind(&self) -> RegistryKind {
        RegistryKind::Compute
    }

    async fn lookup(&self, name: &str) -> Result<Vec<Conflict>, RegistryError> {
        let regions = self.regions().await?;
        let grouped = try_join_all(
            regions
                .iter()
                .map(|region| self.inventory.instances_by_tag(region, NAME_TAG)),
        )
        .await?;

        let conflicts: Vec<Conflict> = grouped
            .into_iter()
            .filter_map(|mut by_name| by_name.remove(name))
            .flatten()
            .map(|instance| {
                Conflict::new(
                    RegistryKind::Compute,
                    format!("{} ({})", instance.id, instance.region),
                )
            })
            .collect();

        debug!(
            "Compute lookup for {} across {} regions: {} matches",
            name,
            regions.len(),
            conflicts.len()
        );
        Ok(conflicts)
    }
}
