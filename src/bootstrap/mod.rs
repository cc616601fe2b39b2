// Copyright (c) 2025 - Cowboy AI, Inc.

//! Bootstrap Payload Generator
//!
//! Turns a [`BootstrapDescriptor`] into the two artifacts a new instance
//! consumes on first boot:
//!
//! - **first-boot JSON**: run list, assigned hostname, cluster color and
//!   domains, parsed by `chef-client -j`
//! - **user-data script**: writes the validation key, the encrypted data bag
//!   secret, `client.rb` and the first-boot JSON, then starts the client
//!
//! # First-boot JSON shape
//!
//! ```text
//! {
//!   "run_list": ["role[base]"],
//!   "assigned_hostname": "ep042",
//!   "rails": { "cluster": { "color": "blue" } },
//!   "base_domain": "example.com",
//!   "domain": "ep042.example.com"        (only when supplied)
//! }
//! ```
//!
//! Rendering performs no network calls. Apart from reading the two key
//! files it is a pure function of its inputs.

use handlebars::Handlebars;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use crate::adapters::FileSource;
use crate::domain::BootstrapDescriptor;

/// Script template the payload is rendered into
pub const BOOT_TEMPLATE: &str = include_str!("boot.sh.hbs");

/// Heredoc terminator around the validation key in [`BOOT_TEMPLATE`]
pub const VALIDATION_KEY_TERMINATOR: &str = "VALIDATION_KEY";

/// Heredoc terminator around the data bag secret in [`BOOT_TEMPLATE`]
pub const SECRET_TERMINATOR: &str = "DATA_BAG_SECRET";

const SCRIPT_TEMPLATE_NAME: &str = "boot_script";

/// Absolute path of the configuration-management client
pub const CHEF_CLIENT_BIN: &str = "/usr/bin/chef-client";

/// Where the script writes the first-boot JSON
pub const FIRST_BOOT_PATH: &str = "/etc/chef/first-boot.json";

/// Bootstrap rendering error
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("Could not read {}: {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not valid UTF-8", .0.display())]
    NotUtf8(PathBuf),

    /// A line of the file would close the heredoc it is written into
    #[error("{} contains a line equal to the heredoc terminator {terminator}", .path.display())]
    HeredocTerminator {
        path: PathBuf,
        terminator: &'static str,
    },

    #[error("Could not encode first-boot JSON: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("Bootstrap template error: {0}")]
    Template(String),
}

/// Chef server connection parameters baked into every payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BootstrapSettings {
    pub validation_key_path: PathBuf,
    pub validation_client_name: String,
    pub chef_server_url: String,
    pub encrypted_secret_path: PathBuf,
}

/// The first-boot document, exactly as the instance parses it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirstBoot {
    pub run_list: Vec<String>,
    pub assigned_hostname: String,
    pub rails: RailsAttributes,
    pub base_domain: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RailsAttributes {
    pub cluster: ClusterAttributes,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterAttributes {
    pub color: String,
}

impl From<&BootstrapDescriptor> for FirstBoot {
    fn from(descriptor: &BootstrapDescriptor) -> Self {
        Self {
            run_list: descriptor.run_list().entries().to_vec(),
            assigned_hostname: descriptor.hostname().to_string(),
            rails: RailsAttributes {
                cluster: ClusterAttributes {
                    color: descriptor.color().to_string(),
                },
            },
            base_domain: descriptor.base_domain().to_string(),
            domain: descriptor.domain().map(str::to_string),
        }
    }
}

/// Rendered payload handed to the server-creation call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapPayload {
    pub first_boot_json: String,
    pub script: String,
}

pub struct BootstrapGenerator {
    settings: BootstrapSettings,
    files: Arc<dyn FileSource>,
    handlebars: Handlebars<'static>,
}

impl BootstrapGenerator {
    /// Generator over the bundled [`BOOT_TEMPLATE`]
    pub fn new(settings: BootstrapSettings, files: Arc<dyn FileSource>) -> Result<Self, BootstrapError> {
        Self::with_template(settings, files, BOOT_TEMPLATE)
    }

    /// Generator over a custom script template
    ///
    /// Strict mode is on, so a placeholder without a value fails the render
    /// instead of leaving a hole in the script.
    pub fn with_template(
        settings: BootstrapSettings,
        files: Arc<dyn FileSource>,
        template: &str,
    ) -> Result<Self, BootstrapError> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars
            .register_template_string(SCRIPT_TEMPLATE_NAME, template)
            .map_err(|e| {
                BootstrapError::Template(format!("Failed to register boot script template: {e}"))
            })?;

        Ok(Self {
            settings,
            files,
            handlebars,
        })
    }

    pub fn settings(&self) -> &BootstrapSettings {
        &self.settings
    }

    /// First-boot JSON document
    pub fn first_boot(&self, descriptor: &BootstrapDescriptor) -> Result<String, BootstrapError> {
        Ok(serde_json::to_string(&FirstBoot::from(descriptor))?)
    }

    pub fn validation_key(&self) -> Result<String, BootstrapError> {
        self.read_heredoc(&self.settings.validation_key_path, VALIDATION_KEY_TERMINATOR)
    }

    pub fn encrypted_data_bag_secret(&self) -> Result<String, BootstrapError> {
        self.read_heredoc(&self.settings.encrypted_secret_path, SECRET_TERMINATOR)
    }

    /// `client.rb` contents
    pub fn config_content(&self, descriptor: &BootstrapDescriptor) -> String {
        format!(
            concat!(
                "  require 'syslog-logger'\n",
                "  Logger::Syslog.class_eval do\n",
                "    attr_accessor :sync, :formatter\n",
                "  end\n",
                "\n",
                "  log_level              :info\n",
                "  log_location           Logger::Syslog.new(\"chef-client\")\n",
                "  chef_server_url        \"{}\"\n",
                "  validation_client_name \"{}\"\n",
                "  node_name              \"{}\"\n",
            ),
            self.settings.chef_server_url,
            self.settings.validation_client_name,
            descriptor.hostname(),
        )
    }

    /// Command that hands the first-boot JSON to the client
    pub fn start_command(descriptor: &BootstrapDescriptor) -> String {
        format!(
            "{} -j {} -E {}",
            CHEF_CLIENT_BIN,
            FIRST_BOOT_PATH,
            descriptor.environment()
        )
    }

    /// Render the first-boot JSON and the user-data script
    pub fn render(&self, descriptor: &BootstrapDescriptor) -> Result<BootstrapPayload, BootstrapError> {
        let first_boot_json = self.first_boot(descriptor)?;
        let validation_key = self.validation_key()?;
        let secret = self.encrypted_data_bag_secret()?;
        let client_config = self.config_content(descriptor);
        let start_command = Self::start_command(descriptor);

        let context = json!({
            "hostname": descriptor.hostname(),
            "validation_key": validation_key.trim_end(),
            "encrypted_data_bag_secret": secret.trim_end(),
            "client_config": client_config.trim_end(),
            "first_boot_json": first_boot_json.as_str(),
            "start_command": start_command.as_str(),
        });
        let script = self
            .handlebars
            .render(SCRIPT_TEMPLATE_NAME, &context)
            .map_err(|e| BootstrapError::Template(format!("Failed to render boot script: {e}")))?;
        debug!(
            "Rendered bootstrap for {} ({} bytes)",
            descriptor.hostname(),
            script.len()
        );

        Ok(BootstrapPayload {
            first_boot_json,
            script,
        })
    }

    fn read_text(&self, path: &Path) -> Result<String, BootstrapError> {
        let bytes = self.files.read(path).map_err(|source| BootstrapError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        String::from_utf8(bytes).map_err(|_| BootstrapError::NotUtf8(path.to_path_buf()))
    }

    /// File contents that will be written through a quoted heredoc
    fn read_heredoc(&self, path: &Path, terminator: &'static str) -> Result<String, BootstrapError> {
        let text = self.read_text(path)?;
        if text.lines().any(|line| line == terminator) {
            return Err(BootstrapError::HeredocTerminator {
                path: path.to_path_buf(),
                terminator,
            });
        }
        Ok(text)
    }
}
