// Copyright (c) 2025 - Cowboy AI, Inc.
//! Integration tests for explicit hostname validation

mod fixtures;

use fixtures::{World, OTHER_REGION, REGION};
use test_case::test_case;
use zest_instance::domain::{NamingConvention, RegistryKind, ValidationError};
use zest_instance::service::HostnameValidator;

#[test_case("d999", true ; "letter then digits")]
#[test_case("ep042", true ; "two letter prefix")]
#[test_case("ep", false ; "no digits")]
#[test_case("ep04x", false ; "trailing letter")]
#[test_case("9ep04", false ; "leading digit")]
#[test_case("Ep042", false ; "uppercase prefix")]
fn test_prefix_followed_by_numbers(name: &str, expected: bool) {
    assert_eq!(NamingConvention::is_prefix_followed_by_numbers(name), expected);
}

/// Test: A well-formed name free everywhere has no problems
#[tokio::test]
async fn test_free_hostname_is_valid() {
    let world = World::new().await;
    let validator = HostnameValidator::new(world.checker());

    let errors = validator.validate(Some("d999")).await.unwrap();
    assert!(errors.is_empty(), "unexpected errors: {:?}", errors);
}

/// Test: One compute conflict produces exactly one error naming the registry
#[tokio::test]
async fn test_compute_conflict_reported_once() {
    let world = World::new().await;
    world.compute.add_named_instance(REGION, "i-1", "d999").await;
    let validator = HostnameValidator::new(world.checker());

    let errors = validator.validate(Some("d999")).await.unwrap();

    assert_eq!(errors.len(), 1);
    let message = errors[0].to_string();
    assert!(message.contains("d999"));
    assert!(message.contains("compute instance"));
    assert!(message.ends_with("already exists. Delete first."));
}

/// Test: Every registry holding the name contributes its own error
#[tokio::test]
async fn test_conflicts_in_all_registries() {
    let world = World::new().await;
    world.take_everywhere("d999").await;
    world.compute.add_named_instance(OTHER_REGION, "i-2", "d999").await;
    let validator = HostnameValidator::new(world.checker());

    let errors = validator.validate(Some("d999")).await.unwrap();

    let registries: Vec<RegistryKind> = errors
        .iter()
        .map(|error| match error {
            ValidationError::AlreadyExists { conflict, .. } => conflict.registry,
            other => panic!("unexpected error {:?}", other),
        })
        .collect();
    assert_eq!(
        registries,
        vec![
            RegistryKind::Node,
            RegistryKind::ApiClient,
            RegistryKind::Compute,
            RegistryKind::Compute,
            RegistryKind::Dns,
        ]
    );
}

/// Test: Blank and absent names yield exactly one blank error
#[tokio::test]
async fn test_blank_hostname() {
    let world = World::new().await;
    let validator = HostnameValidator::new(world.checker());

    for hostname in [None, Some("")] {
        let errors = validator.validate(hostname).await.unwrap();
        assert_eq!(errors, vec![ValidationError::Blank]);
        assert_eq!(errors[0].to_string(), "hostname can't be blank");
    }
}

/// Test: Naming problems and conflicts are reported together
#[tokio::test]
async fn test_naming_and_conflict_errors_accumulate() {
    let world = World::new().await;
    world.chef.add_node("web-1", None).await;
    let validator = HostnameValidator::new(world.checker())
        .convention(NamingConvention::with_prefixes(["ep"]));

    let errors = validator.validate(Some("web-1")).await.unwrap();

    assert_eq!(errors.len(), 3);
    assert_eq!(errors[0], ValidationError::InvalidPrefix);
    assert_eq!(errors[1], ValidationError::NotPrefixFollowedByNumbers);
    assert_eq!(
        errors[2].to_string(),
        "web-1 in chef node web-1 already exists. Delete first."
    );
}

/// Test: Fully-qualified names are looked up under their own zone
#[tokio::test]
async fn test_fully_qualified_dns_conflict() {
    let world = World::new().await;
    world.add_cname("d998").await;
    let validator = HostnameValidator::new(world.checker());

    let errors = validator.validate(Some("d998.internal.com")).await.unwrap();

    assert!(errors
        .iter()
        .any(|error| matches!(error, ValidationError::AlreadyExists { conflict, .. } if conflict.registry == RegistryKind::Dns)));
}
