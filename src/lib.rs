//! Hostname allocation and bootstrap payloads for Chef-managed cloud instances
//!
//! New instances get a short, convention-based hostname (`ep042`) that must
//! be unused in four registries before the server is created: the Chef node
//! directory, the Chef API client directory, the compute `Name` tags of every
//! region, and the DNS zone. Once a name is settled, the bootstrap generator
//! renders the first-boot JSON and user-data script the instance runs.
//!
//! - [`registry`] - one probe per naming registry
//! - [`service`] - uniqueness checker, allocator, validator, provisioner
//! - [`bootstrap`] - first-boot JSON and user-data script
//! - [`adapters`] - collaborator traits and in-memory implementations

pub mod adapters;
pub mod bootstrap;
pub mod config;
pub mod domain;
pub mod errors;
pub mod registry;
pub mod service;

// Re-export commonly used types
pub use bootstrap::{BootstrapGenerator, BootstrapPayload, BootstrapSettings};
pub use config::ProvisionConfig;
pub use domain::{BootstrapDescriptor, Conflict, ErrorReport, RegistryKind, ValidationError};
pub use errors::{ProvisionError, ProvisionResult, RegistryError};
pub use service::{HostnameAllocator, HostnameValidator, InstanceProvisioner, UniquenessChecker};
