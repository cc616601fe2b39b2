// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Hostname Allocation
//!
//! Whatever the inputs and the taken names, an allocation either yields a
//! free, well-formed hostname or exactly one exhaustion error.

use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;

use zest_instance::adapters::memory::{InMemoryChef, InMemoryCompute, InMemoryDns};
use zest_instance::domain::{NamingConvention, ValidationError};
use zest_instance::registry::{
    ApiClientProbe, ComputeTagProbe, DnsRecordProbe, NodeProbe, ZoneResolver,
};
use zest_instance::service::{HostnameAllocator, RandomNumbers, UniquenessChecker, MAX_ATTEMPTS};

// ============================================================================
// Generators
// ============================================================================

fn word() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-z0-9-]{0,12}"
}

fn taken_numbers() -> impl Strategy<Value = HashSet<u16>> {
    prop::collection::hash_set(0u16..1000, 0..50)
}

fn checker(chef: Arc<InMemoryChef>, dns: Arc<InMemoryDns>) -> Arc<UniquenessChecker> {
    Arc::new(UniquenessChecker::new(
        Arc::new(NodeProbe::new(chef.clone())),
        Arc::new(ApiClientProbe::new(chef)),
        Arc::new(ComputeTagProbe::new(Arc::new(InMemoryCompute::with_regions([
            "us-east-1",
        ])))),
        Arc::new(DnsRecordProbe::new(Arc::new(ZoneResolver::new(
            dns,
            "internal.com.",
        )))),
    ))
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Allocated names are two lowercase letters then three digits
    #[test]
    fn prop_allocation_shape(
        environment in word(),
        base_domain in word(),
        seed in any::<u64>(),
        taken in taken_numbers(),
    ) {
        let outcome = tokio_test::block_on(async {
            let chef = Arc::new(InMemoryChef::new());
            let dns = Arc::new(InMemoryDns::new());
            dns.add_zone("Z1", "internal.com.").await;

            let prefix = format!(
                "{}{}",
                NamingConvention::prefix_char(&base_domain).unwrap(),
                NamingConvention::prefix_char(&environment).unwrap()
            );
            for number in &taken {
                chef.add_node(format!("{}{:03}", prefix, number), None).await;
            }

            let mut allocator = HostnameAllocator::with_numbers(
                checker(chef.clone(), dns),
                RandomNumbers::seeded(seed),
            );
            let allocation = allocator.allocate(&environment, &base_domain).await.unwrap();
            (prefix, allocation)
        });
        let (prefix, allocation) = outcome;

        prop_assert!(allocation.attempts >= 1 && allocation.attempts <= MAX_ATTEMPTS);
        match allocation.hostname {
            Some(hostname) => {
                prop_assert!(allocation.errors.is_empty());
                prop_assert_eq!(hostname.len(), 5);
                prop_assert!(hostname.starts_with(&prefix));
                prop_assert!(NamingConvention::is_prefix_followed_by_numbers(&hostname));
                let number: u16 = hostname[2..].parse().unwrap();
                prop_assert!(!taken.contains(&number));
            }
            None => {
                prop_assert_eq!(
                    allocation.errors,
                    vec![ValidationError::AllocationExhausted { attempts: MAX_ATTEMPTS }]
                );
            }
        }
    }

    /// Same seed, same registries, same hostname
    #[test]
    fn prop_seeded_allocation_repeats(seed in any::<u64>()) {
        let (first, second) = tokio_test::block_on(async {
            let dns = Arc::new(InMemoryDns::new());
            dns.add_zone("Z1", "internal.com.").await;
            let checker = checker(Arc::new(InMemoryChef::new()), dns);

            let mut a = HostnameAllocator::with_numbers(checker.clone(), RandomNumbers::seeded(seed));
            let mut b = HostnameAllocator::with_numbers(checker, RandomNumbers::seeded(seed));
            (
                a.allocate("production", "example.com").await.unwrap(),
                b.allocate("production", "example.com").await.unwrap(),
            )
        });
        prop_assert_eq!(first, second);
    }
}
