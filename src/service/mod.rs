// Copyright (c) 2025 - Cowboy AI, Inc.
//! Service Layer for Hostname Allocation and Provisioning
//!
//! # Architecture
//!
//! ```text
//! InstanceProvisioner
//!     ↓
//! HostnameAllocator / HostnameValidator
//!     ↓
//! UniquenessChecker
//!     ↓
//! Registry Probes (node, api client, compute, DNS)
//!     ↓
//! External collaborators (adapters)
//! ```
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use zest_instance::adapters::memory::{InMemoryChef, InMemoryCompute, InMemoryDns};
//! use zest_instance::registry::{
//!     ApiClientProbe, ComputeTagProbe, DnsRecordProbe, NodeProbe, ZoneResolver,
//! };
//! use zest_instance::service::{HostnameAllocator, SequenceNumbers, UniquenessChecker};
//!
//! # tokio_test::block_on(async {
//! let chef = Arc::new(InMemoryChef::new());
//! let compute = Arc::new(InMemoryCompute::with_regions(["us-east-1"]));
//! let dns = Arc::new(InMemoryDns::new());
//! dns.add_zone("Z1", "internal.com.").await;
//!
//! let checker = Arc::new(UniquenessChecker::new(
//!     Arc::new(NodeProbe::new(chef.clone())),
//!     Arc::new(ApiClientProbe::new(chef)),
//!     Arc::new(ComputeTagProbe::new(compute)),
//!     Arc::new(DnsRecordProbe::new(Arc::new(ZoneResolver::new(dns, "internal.com.")))),
//! ));
//!
//! let mut allocator = HostnameAllocator::with_numbers(checker, SequenceNumbers::new([42]));
//! let allocation = allocator.allocate("production", "example.com").await.unwrap();
//! assert_eq!(allocation.hostname.as_deref(), Some("ep042"));
//! # });
//! ```

pub mod allocator;
pub mod provisioner;
pub mod uniqueness;
pub mod validator;

pub use allocator::{
    Allocation, HostnameAllocator, NumberSource, RandomNumbers, SequenceNumbers, MAX_ATTEMPTS,
};
pub use provisioner::{
    Collaborators, InstanceProvisioner, InstanceRequest, LaunchedInstance, PreparedInstance,
};
pub use uniqueness::UniquenessChecker;
pub use validator::HostnameValidator;
