// Copyright (c) 2025 - Cowboy AI, Inc.
//! Instance Provisioner
//!
//! Orchestrates one provisioning request end to end:
//!
//! ```text
//! InstanceRequest
//!     ↓ prepare
//! hostname (explicit → validate, otherwise allocate)
//! configuration checks (credentials, cluster tag, key files, image)
//!     ↓ any problem → ProvisionError::Validation(full report)
//! BootstrapDescriptor → BootstrapPayload → ServerDefinition
//!     ↓ launch
//! ComputeProvisioner::create_server
//!     ↓ wait_for_ready
//! DnsService::create_record (A, fqdn → private IP, TTL 300)
//! ```
//!
//! Every problem found during `prepare` is collected before failing so the
//! operator sees the complete list in one run.

use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, warn};

use super::allocator::{HostnameAllocator, NumberSource, RandomNumbers};
use super::uniqueness::UniquenessChecker;
use super::validator::HostnameValidator;
use crate::adapters::{
    ApiClientDirectory, ComputeInventory, ComputeProvisioner, DnsRecord, DnsService, FileSource,
    NodeDirectory,
};
use crate::bootstrap::{BootstrapGenerator, BootstrapPayload};
use crate::config::ProvisionConfig;
use crate::domain::{
    BootstrapDescriptor, ErrorReport, RunList, ServerDefinition, ServerSummary, ValidationError,
    ENVIRONMENT_TAG, NAME_TAG,
};
use crate::errors::{ProvisionError, ProvisionResult};
use crate::registry::{ApiClientProbe, ComputeTagProbe, DnsRecordProbe, NodeProbe, ZoneResolver};

/// Flavor used when none is requested
pub const DEFAULT_FLAVOR: &str = "m1.small";

/// IAM instance profile used when none is requested
pub const DEFAULT_IAM_ROLE: &str = "default_role";

/// TTL of the A record registered for a new instance
pub const RECORD_TTL: u32 = 300;

/// External systems the provisioner talks to
#[derive(Clone)]
pub struct Collaborators {
    pub nodes: Arc<dyn NodeDirectory>,
    pub clients: Arc<dyn ApiClientDirectory>,
    pub inventory: Arc<dyn ComputeInventory>,
    pub compute: Arc<dyn ComputeProvisioner>,
    pub dns: Arc<dyn DnsService>,
    pub files: Arc<dyn FileSource>,
}

/// One request to create an instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceRequest {
    pub environment: String,
    pub base_domain: String,
    pub cluster_tag: Option<String>,
    /// Overrides the configured region
    pub region: Option<String>,
    /// Explicit node name; allocated when absent
    pub hostname: Option<String>,
    pub run_list: RunList,
    pub image: Option<String>,
    pub flavor: String,
    pub ssh_key_name: Option<String>,
    pub iam_role: String,
    pub security_groups: Vec<String>,
    pub security_group_ids: Vec<String>,
    pub availability_zone: Option<String>,
    pub subnet_id: Option<String>,
    /// Wait for the server and register its DNS record
    pub wait_for_ready: bool,
}

impl InstanceRequest {
    pub fn new(environment: impl Into<String>, base_domain: impl Into<String>) -> Self {
        Self {
            environment: environment.into(),
            base_domain: base_domain.into(),
            cluster_tag: None,
            region: None,
            hostname: None,
            run_list: RunList::default(),
            image: None,
            flavor: DEFAULT_FLAVOR.to_string(),
            ssh_key_name: None,
            iam_role: DEFAULT_IAM_ROLE.to_string(),
            security_groups: Vec::new(),
            security_group_ids: Vec::new(),
            availability_zone: None,
            subnet_id: None,
            wait_for_ready: false,
        }
    }
}

/// A validated request ready to be launched
#[derive(Debug, Clone)]
pub struct PreparedInstance {
    pub hostname: String,
    pub fqdn: String,
    pub region: String,
    pub descriptor: BootstrapDescriptor,
    pub payload: BootstrapPayload,
    pub server: ServerDefinition,
    pub wait_for_ready: bool,
}

/// Result of a launch
#[derive(Debug, Clone)]
pub struct LaunchedInstance {
    pub server: ServerSummary,
    /// Registered when the launch waited for the server
    pub dns_record: Option<DnsRecord>,
}

pub struct InstanceProvisioner<N: NumberSource = RandomNumbers> {
    config: ProvisionConfig,
    allocator: HostnameAllocator<N>,
    validator: HostnameValidator,
    generator: BootstrapGenerator,
    zones: Arc<ZoneResolver>,
    compute: Arc<dyn ComputeProvisioner>,
    files: Arc<dyn FileSource>,
}

impl InstanceProvisioner<RandomNumbers> {
    pub fn new(config: ProvisionConfig, collaborators: Collaborators) -> ProvisionResult<Self> {
        Self::with_numbers(config, collaborators, RandomNumbers::new())
    }
}

impl<N: NumberSource> InstanceProvisioner<N> {
    /// Wire probes, checker, allocator, validator and generator from config
    pub fn with_numbers(
        config: ProvisionConfig,
        collaborators: Collaborators,
        numbers: N,
    ) -> ProvisionResult<Self> {
        let zones = Arc::new(ZoneResolver::new(
            collaborators.dns.clone(),
            config.dns_domain.clone(),
        ));
        let compute_probe = if config.regions.is_empty() {
            ComputeTagProbe::new(collaborators.inventory.clone())
        } else {
            ComputeTagProbe::with_regions(collaborators.inventory.clone(), config.regions.clone())
        };
        let checker = Arc::new(UniquenessChecker::new(
            Arc::new(NodeProbe::new(collaborators.nodes.clone())),
            Arc::new(ApiClientProbe::new(collaborators.clients.clone())),
            Arc::new(compute_probe),
            Arc::new(DnsRecordProbe::new(zones.clone())),
        ));

        let allocator = HostnameAllocator::with_numbers(checker.clone(), numbers)
            .convention(config.naming.clone());
        let validator = HostnameValidator::new(checker).convention(config.naming.clone());
        let generator =
            BootstrapGenerator::new(config.bootstrap_settings(), collaborators.files.clone())?;

        Ok(Self {
            config,
            allocator,
            validator,
            generator,
            zones,
            compute: collaborators.compute,
            files: collaborators.files,
        })
    }

    pub fn config(&self) -> &ProvisionConfig {
        &self.config
    }

    /// Resolve the hostname, run every check and build the server definition
    pub async fn prepare(&mut self, request: InstanceRequest) -> ProvisionResult<PreparedInstance> {
        let mut report = ErrorReport::new();

        let hostname = match request.hostname.clone() {
            Some(name) => {
                report.extend(self.validator.validate(Some(name.as_str())).await?);
                Some(name)
            }
            None => {
                let allocation = self
                    .allocator
                    .allocate(&request.environment, &request.base_domain)
                    .await?;
                report.extend(allocation.errors);
                allocation.hostname
            }
        };

        report.extend(self.config.credential_errors());

        let color = request.cluster_tag.clone().filter(|tag| !tag.is_empty());
        if color.is_none() {
            report.push(ValidationError::MissingClusterTag);
        }

        if !self.files.exists(&self.config.validation_key_path) {
            report.push(ValidationError::MissingValidationKey(
                self.config.validation_key_path.clone(),
            ));
        }

        match &self.config.encrypted_secret_path {
            Some(path) if self.files.exists(path) => {}
            other => report.push(ValidationError::MissingSecretFile(
                other.clone().unwrap_or_default(),
            )),
        }

        let region = request
            .region
            .clone()
            .or_else(|| self.config.region.clone())
            .filter(|region| !region.is_empty());
        match (&region, &request.image) {
            (None, _) => report.push(ValidationError::MissingRegion),
            (Some(region), Some(image)) => {
                if !self.compute.image_exists(region, image).await? {
                    report.push(ValidationError::InvalidImage(image.clone()));
                }
            }
            (Some(_), None) => report.push(ValidationError::InvalidImage(String::new())),
        }

        let (Some(hostname), Some(region), Some(color), Some(image), true) =
            (hostname, region, color, request.image.clone(), report.is_empty())
        else {
            for error in report.iter() {
                warn!("{}", error);
            }
            return Err(ProvisionError::Validation(report));
        };

        let mut builder = BootstrapDescriptor::builder()
            .environment(request.environment.clone())
            .run_list(request.run_list.clone())
            .hostname(hostname.clone())
            .color(color)
            .base_domain(request.base_domain.clone());
        if !self.config.dns_domain.is_empty() {
            builder = builder.domain(self.config.dns_domain.clone());
        }
        let descriptor = builder.build()?;
        let payload = self.generator.render(&descriptor)?;

        let mut server = ServerDefinition {
            image_id: image,
            groups: request.security_groups.clone(),
            security_group_ids: request.security_group_ids.clone(),
            flavor_id: request.flavor.clone(),
            key_name: request.ssh_key_name.clone(),
            availability_zone: request.availability_zone.clone(),
            subnet_id: request.subnet_id.clone(),
            tags: BTreeMap::from([
                (NAME_TAG.to_string(), hostname.clone()),
                (ENVIRONMENT_TAG.to_string(), request.environment.clone()),
            ]),
            user_data: payload.script.clone(),
            iam_instance_profile_name: request.iam_role.clone(),
            associate_public_ip: false,
        };
        server.associate_public_ip = server.is_vpc();

        info!("Prepared {} in {} ({})", hostname, region, request.environment);
        Ok(PreparedInstance {
            fqdn: self.config.fqdn(&hostname),
            hostname,
            region,
            descriptor,
            payload,
            server,
            wait_for_ready: request.wait_for_ready,
        })
    }

    /// Create the server and, when requested, register its DNS record
    pub async fn launch(&self, prepared: &PreparedInstance) -> ProvisionResult<LaunchedInstance> {
        let created = self
            .compute
            .create_server(&prepared.region, &prepared.server)
            .await?;
        log_summary(prepared, &created);

        if !prepared.wait_for_ready {
            return Ok(LaunchedInstance {
                server: created,
                dns_record: None,
            });
        }

        let ready = self
            .compute
            .wait_until_ready(&prepared.region, &created.id)
            .await?;
        info!(
            public_dns = ?ready.public_dns_name,
            public_ip = ?ready.public_ip_address,
            private_dns = ?ready.private_dns_name,
            private_ip = ?ready.private_ip_address,
            root_device = ?ready.root_device_type,
            "Server {} ready",
            ready.id
        );

        let private_ip = ready.private_ip_address.clone().ok_or_else(|| {
            ProvisionError::Configuration(format!("{} has no private IP address", ready.id))
        })?;
        let record = DnsRecord {
            name: prepared.fqdn.clone(),
            record_type: "A".to_string(),
            value: private_ip,
            ttl: Some(RECORD_TTL),
        };
        let zone = self.zones.default_zone().await?;
        self.zones
            .dns()
            .create_record(zone, record.clone())
            .await?;
        info!("Registered {} -> {}", record.name, record.value);

        Ok(LaunchedInstance {
            server: ready,
            dns_record: Some(record),
        })
    }
}

fn log_summary(prepared: &PreparedInstance, server: &ServerSummary) {
    info!(
        hostname = %prepared.fqdn,
        environment = %prepared.descriptor.environment(),
        run_list = %prepared.descriptor.run_list(),
        instance_id = %server.id,
        flavor = %server.flavor_id,
        image = %server.image_id,
        region = %prepared.region,
        availability_zone = ?server.availability_zone,
        security_groups = %server.groups.join(", "),
        ssh_key = ?server.key_name,
        "Created server"
    );
}
