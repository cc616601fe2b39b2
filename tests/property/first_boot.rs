// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for First-Boot Documents

use proptest::prelude::*;
use std::sync::Arc;

use zest_instance::adapters::memory::InMemoryFiles;
use zest_instance::bootstrap::FirstBoot;
use zest_instance::domain::{BootstrapDescriptor, RunList};
use zest_instance::{BootstrapGenerator, BootstrapSettings};

fn generator() -> BootstrapGenerator {
    let files = InMemoryFiles::new()
        .with_file("/key", "KEY")
        .with_file("/secret", "SECRET");
    BootstrapGenerator::new(
        BootstrapSettings {
            validation_key_path: "/key".into(),
            validation_client_name: "validator".to_string(),
            chef_server_url: "https://example".to_string(),
            encrypted_secret_path: "/secret".into(),
        },
        Arc::new(files),
    )
    .unwrap()
}

fn run_list_entry() -> impl Strategy<Value = String> {
    prop_oneof!["role\\[[a-z_]{1,10}\\]", "recipe\\[[a-z_]{1,10}(::[a-z_]{1,8})?\\]"]
}

prop_compose! {
    fn descriptor()(
        environment in "[a-z]{1,10}",
        hostname in "[a-z]{1,3}[0-9]{1,4}",
        run_list in prop::collection::vec(run_list_entry(), 1..5),
        color in ".{0,16}",
        base_domain in "[a-z.]{0,20}",
        domain in prop::option::of("[a-z]{1,10}\\.com\\."),
    ) -> BootstrapDescriptor {
        let mut builder = BootstrapDescriptor::builder()
            .environment(environment)
            .hostname(hostname)
            .run_list(RunList::new(run_list))
            .color(color)
            .base_domain(base_domain);
        if let Some(domain) = domain {
            builder = builder.domain(domain);
        }
        builder.build().unwrap()
    }
}

proptest! {
    /// The JSON parses back into exactly the descriptor's fields
    #[test]
    fn prop_first_boot_reflects_descriptor(descriptor in descriptor()) {
        let json = generator().first_boot(&descriptor).unwrap();
        let parsed: FirstBoot = serde_json::from_str(&json).unwrap();

        prop_assert_eq!(parsed.run_list.as_slice(), descriptor.run_list().entries());
        prop_assert_eq!(parsed.assigned_hostname.as_str(), descriptor.hostname());
        prop_assert_eq!(parsed.rails.cluster.color.as_str(), descriptor.color());
        prop_assert_eq!(parsed.base_domain.as_str(), descriptor.base_domain());
        prop_assert_eq!(parsed.domain.as_deref(), descriptor.domain());
    }

    /// The script always ends by starting the client in the descriptor's environment
    #[test]
    fn prop_script_ends_with_start_command(descriptor in descriptor()) {
        let payload = generator().render(&descriptor).unwrap();
        let expected = format!("{}\n", BootstrapGenerator::start_command(&descriptor));
        prop_assert!(payload.script.ends_with(&expected));
        prop_assert!(payload.script.contains(&payload.first_boot_json));
    }
}
