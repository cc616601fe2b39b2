// Copyright (c) 2025 - Cowboy AI, Inc.

//! External collaborator interfaces
//!
//! The allocation core never talks to a cloud or Chef server directly. It
//! consumes these traits, implemented outside the crate against real SDKs
//! and inside it by the [`memory`] module for tests and offline dry runs.
//!
//! ```text
//! NodeProbe        ──> NodeDirectory::lookup_node
//! ApiClientProbe   ──> ApiClientDirectory::lookup_client
//! ComputeTagProbe  ──> ComputeInventory::{regions, instances_by_tag}
//! DnsRecordProbe   ──> DnsService::{zones, records, record}
//! BootstrapGenerator ─> FileSource::read
//! InstanceProvisioner ─> ComputeProvisioner, DnsService::create_record
//! ```
//!
//! Lookups report "not found" as `Ok(None)` or an empty collection. An `Err`
//! always means the registry itself failed.

pub mod local_files;
pub mod memory;

pub use local_files::LocalFiles;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::io;
use std::path::Path;

use crate::domain::{ServerDefinition, ServerSummary};
use crate::errors::{CloudError, RegistryError};

/// Node entry in the configuration-management directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub name: String,
    pub environment: Option<String>,
}

/// API client entry in the configuration-management directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientRecord {
    pub name: String,
    #[serde(default)]
    pub validator: bool,
}

/// A compute instance as seen by the tag index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instance {
    pub id: String,
    pub region: String,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
    pub state: Option<String>,
}

impl Instance {
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }
}

/// Hosted DNS zone
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Zone {
    pub id: String,
    /// Zone domain, normally dot-terminated (`internal.com.`)
    pub domain: String,
}

/// Resource record in a zone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub value: String,
    pub ttl: Option<u32>,
}

/// Configuration-management node directory
#[async_trait]
pub trait NodeDirectory: Send + Sync {
    async fn lookup_node(&self, name: &str) -> Result<Option<NodeRecord>, RegistryError>;
}

/// Configuration-management API client directory
#[async_trait]
pub trait ApiClientDirectory: Send + Sync {
    async fn lookup_client(&self, name: &str) -> Result<Option<ClientRecord>, RegistryError>;
}

/// Compute instances indexed by tag, per region
#[async_trait]
pub trait ComputeInventory: Send + Sync {
    /// Regions instances may live in
    async fn regions(&self) -> Result<Vec<String>, RegistryError>;

    /// All instances in `region`, grouped by the value of `tag_key`
    async fn instances_by_tag(
        &self,
        region: &str,
        tag_key: &str,
    ) -> Result<HashMap<String, Vec<Instance>>, RegistryError>;
}

/// Hosted DNS zones and their records
#[async_trait]
pub trait DnsService: Send + Sync {
    async fn zones(&self) -> Result<Vec<Zone>, RegistryError>;

    async fn records(&self, zone: &Zone) -> Result<Vec<DnsRecord>, RegistryError>;

    /// Direct lookup of a single resource by name
    async fn record(&self, zone: &Zone, name: &str) -> Result<Option<DnsRecord>, RegistryError>;

    async fn create_record(&self, zone: &Zone, record: DnsRecord) -> Result<(), CloudError>;
}

/// Server creation in one region
#[async_trait]
pub trait ComputeProvisioner: Send + Sync {
    async fn image_exists(&self, region: &str, image_id: &str) -> Result<bool, CloudError>;

    async fn create_server(
        &self,
        region: &str,
        definition: &ServerDefinition,
    ) -> Result<ServerSummary, CloudError>;

    /// Block until the server is running and report its network details
    async fn wait_until_ready(
        &self,
        region: &str,
        instance_id: &str,
    ) -> Result<ServerSummary, CloudError>;
}

/// Read access to key and secret files
pub trait FileSource: Send + Sync {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    fn exists(&self, path: &Path) -> bool;
}
