// Copyright (c) 2025 - Cowboy AI, Inc.

//! In-memory collaborators
//!
//! Process-local stand-ins for the Chef server, the compute API and the DNS
//! service. They follow the same "not found is empty" contract as the real
//! adapters, which makes them suitable for tests and offline dry runs.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;
use tracing::debug;

use super::{
    ApiClientDirectory, ClientRecord, ComputeInventory, ComputeProvisioner, DnsRecord,
    DnsService, FileSource, Instance, NodeDirectory, NodeRecord, Zone,
};
use crate::domain::{ServerDefinition, ServerSummary};
use crate::errors::{CloudError, RegistryError};

/// Chef node and API client directories
#[derive(Debug, Default)]
pub struct InMemoryChef {
    nodes: RwLock<HashMap<String, NodeRecord>>,
    clients: RwLock<HashMap<String, ClientRecord>>,
}

impl InMemoryChef {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_node(&self, name: impl Into<String>, environment: Option<String>) {
        let name = name.into();
        self.nodes.write().await.insert(
            name.clone(),
            NodeRecord { name, environment },
        );
    }

    pub async fn add_client(&self, name: impl Into<String>) {
        let name = name.into();
        self.clients.write().await.insert(
            name.clone(),
            ClientRecord {
                name,
                validator: false,
            },
        );
    }
}

#[async_trait]
impl NodeDirectory for InMemoryChef {
    async fn lookup_node(&self, name: &str) -> Result<Option<NodeRecord>, RegistryError> {
        Ok(self.nodes.read().await.get(name).cloned())
    }
}

#[async_trait]
impl ApiClientDirectory for InMemoryChef {
    async fn lookup_client(&self, name: &str) -> Result<Option<ClientRecord>, RegistryError> {
        Ok(self.clients.read().await.get(name).cloned())
    }
}

/// Compute regions, images and instances
#[derive(Debug, Default)]
pub struct InMemoryCompute {
    regions: RwLock<BTreeMap<String, Vec<Instance>>>,
    images: RwLock<HashSet<(String, String)>>,
    next_id: AtomicU64,
}

impl InMemoryCompute {
    pub fn with_regions<I, S>(regions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            regions: RwLock::new(
                regions
                    .into_iter()
                    .map(|region| (region.into(), Vec::new()))
                    .collect(),
            ),
            ..Self::default()
        }
    }

    pub async fn add_image(&self, region: impl Into<String>, image_id: impl Into<String>) {
        self.images
            .write()
            .await
            .insert((region.into(), image_id.into()));
    }

    /// Register an instance carrying a `Name` tag
    pub async fn add_named_instance(
        &self,
        region: impl Into<String>,
        id: impl Into<String>,
        name: impl Into<String>,
    ) {
        let region = region.into();
        let instance = Instance {
            id: id.into(),
            region: region.clone(),
            tags: BTreeMap::from([(crate::domain::NAME_TAG.to_string(), name.into())]),
            state: Some("running".to_string()),
        };
        self.regions
            .write()
            .await
            .entry(region)
            .or_default()
            .push(instance);
    }

    pub async fn instances(&self, region: &str) -> Vec<Instance> {
        self.regions
            .read()
            .await
            .get(region)
            .cloned()
            .unwrap_or_default()
    }

    fn private_ip(sequence: u64) -> String {
        format!("10.0.{}.{}", (sequence / 250) % 256, sequence % 250 + 4)
    }
}

#[async_trait]
impl ComputeInventory for InMemoryCompute {
    async fn regions(&self) -> Result<Vec<String>, RegistryError> {
        Ok(self.regions.read().await.keys().cloned().collect())
    }

    async fn instances_by_tag(
        &self,
        region: &str,
        tag_key: &str,
    ) -> Result<HashMap<String, Vec<Instance>>, RegistryError> {
        let regions = self.regions.read().await;
        let mut grouped: HashMap<String, Vec<Instance>> = HashMap::new();
        for instance in regions.get(region).into_iter().flatten() {
            if let Some(value) = instance.tag(tag_key) {
                grouped
                    .entry(value.to_string())
                    .or_default()
                    .push(instance.clone());
            }
        }
        Ok(grouped)
    }
}

#[async_trait]
impl ComputeProvisioner for InMemoryCompute {
    async fn image_exists(&self, region: &str, image_id: &str) -> Result<bool, CloudError> {
        Ok(self
            .images
            .read()
            .await
            .contains(&(region.to_string(), image_id.to_string())))
    }

    async fn create_server(
        &self,
        region: &str,
        definition: &ServerDefinition,
    ) -> Result<ServerSummary, CloudError> {
        if !self.image_exists(region, &definition.image_id).await? {
            return Err(CloudError::new(
                "create server",
                format!("image {} not found in {}", definition.image_id, region),
            ));
        }

        let sequence = self.next_id.fetch_add(1, Ordering::SeqCst);
        let id = format!("i-{:08x}", sequence);
        let instance = Instance {
            id: id.clone(),
            region: region.to_string(),
            tags: definition.tags.clone(),
            state: Some("pending".to_string()),
        };
        self.regions
            .write()
            .await
            .entry(region.to_string())
            .or_default()
            .push(instance);
        debug!("Created in-memory instance {} in {}", id, region);

        Ok(ServerSummary {
            id,
            flavor_id: definition.flavor_id.clone(),
            image_id: definition.image_id.clone(),
            region: region.to_string(),
            availability_zone: definition.availability_zone.clone(),
            groups: definition.groups.clone(),
            key_name: definition.key_name.clone(),
            root_device_type: Some("ebs".to_string()),
            ..ServerSummary::default()
        })
    }

    async fn wait_until_ready(
        &self,
        region: &str,
        instance_id: &str,
    ) -> Result<ServerSummary, CloudError> {
        let mut regions = self.regions.write().await;
        let instance = regions
            .get_mut(region)
            .and_then(|instances| instances.iter_mut().find(|i| i.id == instance_id))
            .ok_or_else(|| {
                CloudError::new("wait for server", format!("{} not found", instance_id))
            })?;
        instance.state = Some("running".to_string());

        let sequence = u64::from_str_radix(instance_id.trim_start_matches("i-"), 16).unwrap_or(0);
        let private_ip = Self::private_ip(sequence);
        Ok(ServerSummary {
            id: instance.id.clone(),
            region: region.to_string(),
            private_dns_name: Some(format!("ip-{}.internal", private_ip.replace('.', "-"))),
            private_ip_address: Some(private_ip),
            root_device_type: Some("ebs".to_string()),
            ..ServerSummary::default()
        })
    }
}

/// Hosted zones and their records
#[derive(Debug, Default)]
pub struct InMemoryDns {
    zones: RwLock<Vec<Zone>>,
    records: RwLock<HashMap<String, Vec<DnsRecord>>>,
}

impl InMemoryDns {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_zone(&self, id: impl Into<String>, domain: impl Into<String>) -> Zone {
        let zone = Zone {
            id: id.into(),
            domain: domain.into(),
        };
        self.zones.write().await.push(zone.clone());
        zone
    }

    pub async fn add_record(&self, zone: &Zone, record: DnsRecord) {
        self.records
            .write()
            .await
            .entry(zone.id.clone())
            .or_default()
            .push(record);
    }
}

#[async_trait]
impl DnsService for InMemoryDns {
    async fn zones(&self) -> Result<Vec<Zone>, RegistryError> {
        Ok(self.zones.read().await.clone())
    }

    async fn records(&self, zone: &Zone) -> Result<Vec<DnsRecord>, RegistryError> {
        Ok(self
            .records
            .read()
            .await
            .get(&zone.id)
            .cloned()
            .unwrap_or_default())
    }

    async fn record(&self, zone: &Zone, name: &str) -> Result<Option<DnsRecord>, RegistryError> {
        Ok(self
            .records
            .read()
            .await
            .get(&zone.id)
            .and_then(|records| {
                records
                    .iter()
                    .find(|r| r.name.eq_ignore_ascii_case(name))
                    .cloned()
            }))
    }

    async fn create_record(&self, zone: &Zone, record: DnsRecord) -> Result<(), CloudError> {
        if !self.zones.read().await.iter().any(|z| z.id == zone.id) {
            return Err(CloudError::new(
                "create record",
                format!("unknown zone {}", zone.id),
            ));
        }
        self.add_record(zone, record).await;
        Ok(())
    }
}

/// Fixed set of files keyed by path
#[derive(Debug, Clone, Default)]
pub struct InMemoryFiles {
    files: HashMap<PathBuf, Vec<u8>>,
}

impl InMemoryFiles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) -> Self {
        self.files.insert(path.into(), contents.into());
        self
    }
}

impl FileSource for InMemoryFiles {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} not found", path.display()),
            )
        })
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }
}
