// Copyright (c) 2025 - Cowboy AI, Inc.
//! Configuration-management directory probes
//!
//! Nodes and API clients are separate registries: a name can exist as a node
//! without a client and vice versa, so each gets its own probe.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use super::RegistryProbe;
use crate::adapters::{ApiClientDirectory, NodeDirectory};
use crate::domain::{Conflict, RegistryKind};
use crate::errors::RegistryError;

/// Probe over the node directory
pub struct NodeProbe {
    directory: Arc<dyn NodeDirectory>,
}

impl NodeProbe {
    pub fn new(directory: Arc<dyn NodeDirectory>) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl RegistryProbe for NodeProbe {
    fn kind(&self) -> RegistryKind {
        RegistryKind::Node
    }

    async fn lookup(&self, name: &str) -> Result<Vec<Conflict>, RegistryError> {
        let node = self.directory.lookup_node(name).await?;
        debug!("Node lookup for {}: found={}", name, node.is_some());
        Ok(node
            .map(|record| Conflict::new(RegistryKind::Node, record.name))
            .into_iter()
            .collect())
    }
}

/// Probe over the API client directory
pub struct ApiClientProbe {
    directory: Arc<dyn ApiClientDirectory>,
}

impl ApiClientProbe {
    pub fn new(directory: Arc<dyn ApiClientDirectory>) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl RegistryProbe for ApiClientProbe {
    fn kind(&self) -> RegistryKind {
        RegistryKind::ApiClient
    }

    async fn lookup(&self, name: &str) -> Result<Vec<Conflict>, RegistryError> {
        let client = self.directory.lookup_client(name).await?;
        debug!("API client lookup for {}: found={}", name, client.is_some());
        Ok(client
            .map(|record| Conflict::new(RegistryKind::ApiClient, record.name))
            .into_iter()
            .collect())
    }
}
