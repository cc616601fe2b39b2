// Copyright (c) 2025 - Cowboy AI, Inc.
//! Server creation request and the summary returned by the cloud

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Tag key compute instances are named by
pub const NAME_TAG: &str = "Name";

/// Tag key recording the configuration-management environment
pub const ENVIRONMENT_TAG: &str = "environment";

/// Everything handed to the cloud collaborator to create one server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerDefinition {
    pub image_id: String,
    #[serde(default)]
    pub groups: Vec<String>,
    #[serde(default)]
    pub security_group_ids: Vec<String>,
    pub flavor_id: String,
    pub key_name: Option<String>,
    pub availability_zone: Option<String>,
    pub subnet_id: Option<String>,
    pub tags: BTreeMap<String, String>,
    pub user_data: String,
    pub iam_instance_profile_name: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub associate_public_ip: bool,
}

impl ServerDefinition {
    /// Subnet placement implies VPC mode
    pub fn is_vpc(&self) -> bool {
        self.subnet_id.is_some()
    }

    /// Pretty JSON of the definition without the user data, for dry runs
    pub fn summary(&self) -> Result<String, serde_json::Error> {
        let mut value = serde_json::to_value(self)?;
        if let Some(fields) = value.as_object_mut() {
            fields.remove("user_data");
        }
        serde_json::to_string_pretty(&value)
    }
}

/// Details the cloud reports about a created server
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSummary {
    pub id: String,
    pub flavor_id: String,
    pub image_id: String,
    pub region: String,
    pub availability_zone: Option<String>,
    #[serde(default)]
    pub groups: Vec<String>,
    pub key_name: Option<String>,
    pub public_dns_name: Option<String>,
    pub public_ip_address: Option<String>,
    pub private_dns_name: Option<String>,
    pub private_ip_address: Option<String>,
    pub root_device_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definition() -> ServerDefinition {
        ServerDefinition {
            image_id: "ami-123".to_string(),
            groups: vec!["web".to_string()],
            security_group_ids: Vec::new(),
            flavor_id: "m1.small".to_string(),
            key_name: Some("ops".to_string()),
            availability_zone: None,
            subnet_id: None,
            tags: BTreeMap::from([(NAME_TAG.to_string(), "ep042".to_string())]),
            user_data: "#!/bin/bash\n".to_string(),
            iam_instance_profile_name: "default_role".to_string(),
            associate_public_ip: false,
        }
    }

    #[test]
    fn test_summary_omits_user_data() {
        let summary = definition().summary().unwrap();
        assert!(!summary.contains("user_data"));
        assert!(!summary.contains("associate_public_ip"));
        assert!(summary.contains("\"Name\": \"ep042\""));
    }

    #[test]
    fn test_vpc_mode_follows_subnet() {
        let mut def = definition();
        assert!(!def.is_vpc());
        def.subnet_id = Some("subnet-1".to_string());
        assert!(def.is_vpc());
    }
}
