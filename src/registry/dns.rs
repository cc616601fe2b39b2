// Copyright (c) 2025 - Cowboy AI, Inc.
//! DNS record probe and zone resolution
//!
//! # Name resolution
//!
//! ```text
//! d999                 -> default zone, query "d999.internal.com."
//! d999.internal.com    -> zone matched by suffix, query "d999.internal.com."
//! d999.unknown.net     -> no zone by suffix, default zone,
//!                         query "d999.unknown.net.internal.com."
//! ```
//!
//! The default zone is the one whose domain equals the configured DNS domain.
//! It is looked up on first use and cached for the life of the resolver.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use super::RegistryProbe;
use crate::adapters::{DnsRecord, DnsService, Zone};
use crate::domain::{absolute, canonical_domain, fqdn, is_fully_qualified, Conflict, RegistryKind};
use crate::errors::RegistryError;

/// Finds the hosted zone a name belongs to
pub struct ZoneResolver {
    dns: Arc<dyn DnsService>,
    domain: String,
    default_zone: OnceCell<Zone>,
}

impl ZoneResolver {
    /// `domain` is the DNS domain short hostnames live under, e.g. `internal.com.`
    pub fn new(dns: Arc<dyn DnsService>, domain: impl Into<String>) -> Self {
        Self {
            dns,
            domain: domain.into(),
            default_zone: OnceCell::new(),
        }
    }

    pub fn dns(&self) -> &Arc<dyn DnsService> {
        &self.dns
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// `name` qualified with the resolver's DNS domain
    pub fn fqdn(&self, name: &str) -> String {
        fqdn(name, &self.domain)
    }

    /// Zone for the configured DNS domain, cached after the first lookup
    pub async fn default_zone(&self) -> Result<&Zone, RegistryError> {
        self.default_zone
            .get_or_try_init(|| async {
                let wanted = canonical_domain(&self.domain);
                let zone = self
                    .dns
                    .zones()
                    .await?
                    .into_iter()
                    .find(|zone| canonical_domain(&zone.domain) == wanted)
                    .ok_or_else(|| RegistryError::ZoneNotFound(self.domain.clone()))?;
                info!("Resolved DNS zone {} ({})", zone.domain, zone.id);
                Ok(zone)
            })
            .await
    }

    /// Zone whose domain is the longest suffix of a fully-qualified name
    ///
    /// Short names and names no hosted zone covers return `None`.
    pub async fn zone_for_name(&self, name: &str) -> Result<Option<Zone>, RegistryError> {
        if !is_fully_qualified(name) {
            return Ok(None);
        }
        let name = canonical_domain(name);
        let zone = self
            .dns
            .zones()
            .await?
            .into_iter()
            .filter(|zone| {
                let domain = canonical_domain(&zone.domain);
                domain != "." && (name == domain || name.ends_with(&format!(".{}", domain)))
            })
            .max_by_key(|zone| zone.domain.trim_end_matches('.').len());
        Ok(zone)
    }

    /// Zone and absolute record name a candidate should be looked up under
    pub async fn resolve(&self, name: &str) -> Result<(Zone, String), RegistryError> {
        let (zone, qualified) = match self.zone_for_name(name).await? {
            Some(zone) => (zone, name.to_string()),
            None => (
                self.default_zone().await?.clone(),
                self.fqdn(name.trim_end_matches('.')),
            ),
        };
        Ok((zone, absolute(&qualified)))
    }
}

/// Probe over DNS zone record sets
pub struct DnsRecordProbe {
    resolver: Arc<ZoneResolver>,
}

impl DnsRecordProbe {
    pub fn new(resolver: Arc<ZoneResolver>) -> Self {
        Self { resolver }
    }

    fn conflict(record: &DnsRecord) -> Conflict {
        Conflict::new(
            RegistryKind::Dns,
            format!("{} {} {}", record.record_type, record.name, record.value),
        )
    }
}

#[async_trait]
impl RegistryProbe for DnsRecordProbe {
    fn kind(&self) -> RegistryKind {
        RegistryKind::Dns
    }

    async fn lookup(&self, name: &str) -> Result<Vec<Conflict>, RegistryError> {
        let (zone, query) = self.resolver.resolve(name).await?;
        let dns = self.resolver.dns();

        let matches: Vec<Conflict> = dns
            .records(&zone)
            .await?
            .iter()
            .filter(|record| record.name == query)
            .map(Self::conflict)
            .collect();
        debug!("DNS lookup for {} in {}: {} matches", query, zone.domain, matches.len());

        if !matches.is_empty() {
            return Ok(matches);
        }

        // Apex records are not always part of the listed record set.
        Ok(dns
            .record(&zone, &query)
            .await?
            .iter()
            .map(Self::conflict)
            .collect())
    }
}
