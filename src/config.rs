// Copyright (c) 2025 - Cowboy AI, Inc.
//! Provisioning configuration
//!
//! One explicit value passed to every component at construction. Values set
//! in code or loaded from a file take precedence; anything left unset is
//! filled from the environment by [`ProvisionConfig::apply_env`].
//!
//! | Field | Environment variable |
//! |-------|----------------------|
//! | `credentials.aws_access_key_id` | `AWS_ACCESS_KEY_ID` |
//! | `credentials.aws_secret_access_key` | `AWS_SECRET_ACCESS_KEY` |
//! | `region` | `AWS_REGION` |
//! | `regions` | `AWS_REGIONS` (comma separated) |
//! | `dns_domain` | `DNS_DOMAIN` |
//! | `chef_server_url` | `CHEF_SERVER_URL` |
//! | `validation_client_name` | `CHEF_VALIDATION_CLIENT_NAME` |
//! | `validation_key_path` | `CHEF_VALIDATION_KEY` |
//! | `encrypted_secret_path` | `DATABAG_KEY_PATH` |

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::bootstrap::BootstrapSettings;
use crate::domain::{fqdn, NamingConvention, ValidationError};

/// Cloud API credentials
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub aws_access_key_id: Option<String>,
    pub aws_secret_access_key: Option<String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("aws_access_key_id", &self.aws_access_key_id)
            .field(
                "aws_secret_access_key",
                &self.aws_secret_access_key.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

/// Configuration for hostname allocation and instance provisioning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionConfig {
    #[serde(default)]
    pub credentials: Credentials,

    /// Region new servers are created in
    #[serde(default)]
    pub region: Option<String>,

    /// Regions scanned for name conflicts; empty means every region
    #[serde(default)]
    pub regions: Vec<String>,

    /// DNS domain short hostnames are registered under, e.g. `internal.com.`
    #[serde(default)]
    pub dns_domain: String,

    #[serde(default)]
    pub chef_server_url: String,

    #[serde(default = "default_validation_client_name")]
    pub validation_client_name: String,

    #[serde(default = "default_validation_key_path")]
    pub validation_key_path: PathBuf,

    /// Secret used to decrypt encrypted data bags on the instance
    #[serde(default)]
    pub encrypted_secret_path: Option<PathBuf>,

    #[serde(default)]
    pub naming: NamingConvention,
}

fn default_validation_client_name() -> String {
    "chef-validator".to_string()
}

fn default_validation_key_path() -> PathBuf {
    PathBuf::from("/etc/chef/validation.pem")
}

impl Default for ProvisionConfig {
    fn default() -> Self {
        Self {
            credentials: Credentials::default(),
            region: None,
            regions: Vec::new(),
            dns_domain: String::new(),
            chef_server_url: String::new(),
            validation_client_name: default_validation_client_name(),
            validation_key_path: default_validation_key_path(),
            encrypted_secret_path: None,
            naming: NamingConvention::default(),
        }
    }
}

impl ProvisionConfig {
    /// Defaults filled from the process environment
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Fill unset fields from the process environment
    pub fn apply_env(&mut self) {
        self.apply_env_with(|key| std::env::var(key).ok());
    }

    /// Fill unset fields from `lookup`; values already present win
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.is_empty());

        fill(&mut self.credentials.aws_access_key_id, lookup("AWS_ACCESS_KEY_ID"));
        fill(
            &mut self.credentials.aws_secret_access_key,
            lookup("AWS_SECRET_ACCESS_KEY"),
        );
        fill(&mut self.region, lookup("AWS_REGION"));

        if self.regions.is_empty() {
            if let Some(regions) = lookup("AWS_REGIONS") {
                self.regions = regions
                    .split(',')
                    .map(str::trim)
                    .filter(|region| !region.is_empty())
                    .map(str::to_string)
                    .collect();
            }
        }
        if self.dns_domain.is_empty() {
            self.dns_domain = lookup("DNS_DOMAIN").unwrap_or_default();
        }
        if self.chef_server_url.is_empty() {
            self.chef_server_url = lookup("CHEF_SERVER_URL").unwrap_or_default();
        }
        if self.validation_client_name == default_validation_client_name() {
            if let Some(name) = lookup("CHEF_VALIDATION_CLIENT_NAME") {
                self.validation_client_name = name;
            }
        }
        if self.validation_key_path == default_validation_key_path() {
            if let Some(path) = lookup("CHEF_VALIDATION_KEY") {
                self.validation_key_path = PathBuf::from(path);
            }
        }
        fill(
            &mut self.encrypted_secret_path,
            lookup("DATABAG_KEY_PATH").map(PathBuf::from),
        );
    }

    /// One error per missing credential
    pub fn credential_errors(&self) -> Vec<ValidationError> {
        [
            ("aws_access_key_id", &self.credentials.aws_access_key_id),
            ("aws_secret_access_key", &self.credentials.aws_secret_access_key),
        ]
        .into_iter()
        .filter(|(_, value)| value.as_deref().map_or(true, str::is_empty))
        .map(|(key, _)| ValidationError::MissingCredential(key.to_string()))
        .collect()
    }

    /// `name` qualified with the DNS domain; empty names stay empty
    pub fn fqdn(&self, name: &str) -> String {
        fqdn(name, &self.dns_domain)
    }

    /// Chef connection parameters for the bootstrap generator
    pub fn bootstrap_settings(&self) -> BootstrapSettings {
        BootstrapSettings {
            validation_key_path: self.validation_key_path.clone(),
            validation_client_name: self.validation_client_name.clone(),
            chef_server_url: self.chef_server_url.clone(),
            encrypted_secret_path: self.encrypted_secret_path.clone().unwrap_or_default(),
        }
    }
}

fn fill<T>(slot: &mut Option<T>, value: Option<T>) {
    if slot.is_none() {
        *slot = value;
    }
}
