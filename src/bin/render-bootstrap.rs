// Copyright (c) 2025 - Cowboy AI, Inc.
//! Bootstrap Renderer
//!
//! Renders the first-boot JSON and user-data script for one instance without
//! touching any cloud or Chef API. Useful for inspecting what a new server
//! will run before it is created.
//!
//! Run with: cargo run --bin render-bootstrap
//!
//! Chef settings come from the same environment variables as the provisioner
//! (`CHEF_SERVER_URL`, `CHEF_VALIDATION_CLIENT_NAME`, `CHEF_VALIDATION_KEY`,
//! `DATABAG_KEY_PATH`, `DNS_DOMAIN`). The instance itself is described by:
//!
//! - `INSTANCE_ENVIRONMENT` (required)
//! - `INSTANCE_HOSTNAME` (required)
//! - `INSTANCE_RUN_LIST` (default: `role[base]`)
//! - `INSTANCE_CLUSTER_TAG`
//! - `INSTANCE_BASE_DOMAIN`
//! - `INSTANCE_DOMAIN` (default: `DNS_DOMAIN` when set)

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;
use zest_instance::{
    adapters::LocalFiles,
    domain::{BootstrapDescriptor, RunList},
    BootstrapGenerator, ProvisionConfig,
};

/// Description of the instance being rendered
#[derive(Debug, Clone)]
struct InstanceInput {
    environment: String,
    hostname: String,
    run_list: RunList,
    cluster_tag: String,
    base_domain: String,
    domain: Option<String>,
}

impl InstanceInput {
    /// Load the instance description from environment variables
    fn from_env(config: &ProvisionConfig) -> Result<Self> {
        let var = |key: &str| std::env::var(key).ok().filter(|value| !value.is_empty());

        let environment = var("INSTANCE_ENVIRONMENT").context("INSTANCE_ENVIRONMENT not set")?;
        let hostname = var("INSTANCE_HOSTNAME").context("INSTANCE_HOSTNAME not set")?;
        let run_list = var("INSTANCE_RUN_LIST")
            .map(|text| RunList::parse(&text))
            .filter(|run_list| !run_list.is_empty())
            .unwrap_or_default();
        let domain = var("INSTANCE_DOMAIN")
            .or_else(|| Some(config.dns_domain.clone()).filter(|d| !d.is_empty()));

        Ok(Self {
            environment,
            hostname,
            run_list,
            cluster_tag: var("INSTANCE_CLUSTER_TAG").unwrap_or_default(),
            base_domain: var("INSTANCE_BASE_DOMAIN").unwrap_or_default(),
            domain,
        })
    }

    fn descriptor(&self) -> Result<BootstrapDescriptor> {
        let mut builder = BootstrapDescriptor::builder()
            .environment(self.environment.clone())
            .run_list(self.run_list.clone())
            .hostname(self.hostname.clone())
            .color(self.cluster_tag.clone())
            .base_domain(self.base_domain.clone());
        if let Some(domain) = &self.domain {
            builder = builder.domain(domain.clone());
        }
        builder.build().context("Invalid instance description")
    }
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout carries only the payload
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = ProvisionConfig::from_env();
    info!("Configuration loaded:");
    info!("  - Chef server: {}", config.chef_server_url);
    info!("  - Validation client: {}", config.validation_client_name);
    info!("  - Validation key: {}", config.validation_key_path.display());

    let input = InstanceInput::from_env(&config)?;
    let descriptor = input.descriptor()?;
    info!(
        "Rendering bootstrap for {} ({}) with run list {}",
        descriptor.hostname(),
        descriptor.environment(),
        descriptor.run_list()
    );

    let generator = BootstrapGenerator::new(config.bootstrap_settings(), Arc::new(LocalFiles))
        .context("Failed to load bootstrap template")?;
    let payload = generator
        .render(&descriptor)
        .context("Failed to render bootstrap payload")?;

    println!("{}", payload.first_boot_json);
    println!();
    print!("{}", payload.script);

    Ok(())
}
