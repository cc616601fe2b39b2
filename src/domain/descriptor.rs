// Copyright (c) 2025 - Cowboy AI, Inc.
//! Bootstrap descriptor value object
//!
//! Everything a freshly created instance needs to know about itself on first
//! boot. Built once per provisioning request from already-validated inputs
//! and never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Run list applied when none is supplied
pub const DEFAULT_RUN_LIST_ENTRY: &str = "role[base]";

/// Descriptor construction error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DescriptorError {
    #[error("Bootstrap descriptor is missing {0}")]
    MissingField(&'static str),
}

/// Ordered role/recipe identifiers
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunList(Vec<String>);

impl RunList {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(entries.into_iter().map(Into::into).collect())
    }

    /// Parse a comma and/or whitespace separated list
    ///
    /// ```rust
    /// use zest_instance::domain::RunList;
    ///
    /// let run_list = RunList::parse("role[base], role[web]  recipe[nginx]");
    /// assert_eq!(run_list.entries(), ["role[base]", "role[web]", "recipe[nginx]"]);
    /// ```
    pub fn parse(text: &str) -> Self {
        Self(
            text.split(|c: char| c == ',' || c.is_whitespace())
                .filter(|entry| !entry.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    pub fn entries(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for RunList {
    fn default() -> Self {
        Self(vec![DEFAULT_RUN_LIST_ENTRY.to_string()])
    }
}

impl fmt::Display for RunList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(", "))
    }
}

/// First-boot identity of a new instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapDescriptor {
    environment: String,
    run_list: RunList,
    hostname: String,
    color: String,
    base_domain: String,
    domain: Option<String>,
}

impl BootstrapDescriptor {
    pub fn builder() -> BootstrapDescriptorBuilder {
        BootstrapDescriptorBuilder::default()
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn run_list(&self) -> &RunList {
        &self.run_list
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// Cluster tag
    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn base_domain(&self) -> &str {
        &self.base_domain
    }

    /// Fully-qualified domain, when one was supplied
    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }
}

/// Builder for BootstrapDescriptor with fluent API
#[derive(Debug, Default)]
pub struct BootstrapDescriptorBuilder {
    environment: Option<String>,
    run_list: Option<RunList>,
    hostname: Option<String>,
    color: Option<String>,
    base_domain: Option<String>,
    domain: Option<String>,
}

impl BootstrapDescriptorBuilder {
    pub fn environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    pub fn run_list(mut self, run_list: RunList) -> Self {
        self.run_list = Some(run_list);
        self
    }

    pub fn hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = Some(hostname.into());
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn base_domain(mut self, base_domain: impl Into<String>) -> Self {
        self.base_domain = Some(base_domain.into());
        self
    }

    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Build the descriptor
    ///
    /// Environment and hostname must be non-empty. A missing run list falls
    /// back to [`RunList::default`]; cluster tag and base domain default to
    /// empty strings.
    pub fn build(self) -> Result<BootstrapDescriptor, DescriptorError> {
        let environment = self
            .environment
            .filter(|e| !e.is_empty())
            .ok_or(DescriptorError::MissingField("environment"))?;
        let hostname = self
            .hostname
            .filter(|h| !h.is_empty())
            .ok_or(DescriptorError::MissingField("hostname"))?;

        Ok(BootstrapDescriptor {
            environment,
            run_list: self.run_list.unwrap_or_default(),
            hostname,
            color: self.color.unwrap_or_default(),
            base_domain: self.base_domain.unwrap_or_default(),
            domain: self.domain,
        })
    }
}
