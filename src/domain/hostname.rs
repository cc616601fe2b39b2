// Copyright (c) 2025 - Cowboy AI, Inc.
//! Hostname naming convention and DNS name helpers
//!
//! Fleet hostnames are short, convention-based names:
//!
//! ```text
//! <domain-prefix><environment-prefix><3-digit-number>
//!       e               p                 042        => ep042
//! ```
//!
//! The domain prefix is the first letter of the base domain and the
//! environment prefix the first letter of the environment name.
//!
//! # Examples
//!
//! ```rust
//! use zest_instance::domain::NamingConvention;
//!
//! let convention = NamingConvention::default();
//! assert_eq!(
//!     convention.candidate("example.com", "production", 42).as_deref(),
//!     Some("ep042")
//! );
//! assert!(convention.starts_with_valid_prefix("d999"));
//! assert!(NamingConvention::is_prefix_followed_by_numbers("d999"));
//! assert!(!NamingConvention::is_prefix_followed_by_numbers("d99x"));
//! ```

use serde::{Deserialize, Serialize};

/// Size of the numeric suffix space (000-999)
pub const NUMBER_SPACE: u16 = 1000;

/// Naming rules shared by the allocator and the validator
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingConvention {
    /// Prefixes a hostname may start with
    ///
    /// Empty means any run of lowercase ASCII letters is accepted.
    #[serde(default)]
    pub valid_prefixes: Vec<String>,
}

impl NamingConvention {
    /// Restrict hostnames to the given prefixes
    pub fn with_prefixes<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            valid_prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    /// Single-letter prefix derived from a domain or environment name
    ///
    /// Returns `None` when the source is empty or does not start with an
    /// ASCII letter.
    pub fn prefix_char(source: &str) -> Option<char> {
        source
            .chars()
            .next()
            .filter(char::is_ascii_alphabetic)
            .map(|c| c.to_ascii_lowercase())
    }

    /// Build a candidate hostname
    ///
    /// `number` is reduced into the 000-999 space and zero padded.
    pub fn candidate(&self, base_domain: &str, environment: &str, number: u16) -> Option<String> {
        let domain_prefix = Self::prefix_char(base_domain)?;
        let environment_prefix = Self::prefix_char(environment)?;
        Some(format!(
            "{}{}{:03}",
            domain_prefix,
            environment_prefix,
            number % NUMBER_SPACE
        ))
    }

    /// Does the name start with an accepted prefix?
    pub fn starts_with_valid_prefix(&self, name: &str) -> bool {
        if self.valid_prefixes.is_empty() {
            return name.chars().next().is_some_and(|c| c.is_ascii_lowercase());
        }
        self.valid_prefixes
            .iter()
            .any(|prefix| !prefix.is_empty() && name.starts_with(prefix.as_str()))
    }

    /// Is the name a run of lowercase letters followed only by digits?
    pub fn is_prefix_followed_by_numbers(name: &str) -> bool {
        let letters = name.chars().take_while(|c| c.is_ascii_lowercase()).count();
        let digits = &name[letters..];
        letters > 0 && !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
    }
}

/// Does the name carry its own domain (at least two non-empty labels)?
pub fn is_fully_qualified(name: &str) -> bool {
    name.split('.').filter(|label| !label.is_empty()).count() >= 2
}

/// Terminate a DNS name with the root dot
pub fn absolute(name: &str) -> String {
    if name.ends_with('.') {
        name.to_string()
    } else {
        format!("{}.", name)
    }
}

/// Append the DNS domain to a short name; empty names stay empty
pub fn fqdn(name: &str, domain: &str) -> String {
    if name.is_empty() {
        return String::new();
    }
    let domain = domain.trim_start_matches('.');
    if domain.is_empty() {
        return name.to_string();
    }
    format!("{}.{}", name, domain)
}

/// Lowercased, dot-terminated form used to compare zone domains
pub fn canonical_domain(domain: &str) -> String {
    absolute(&domain.to_ascii_lowercase())
}
