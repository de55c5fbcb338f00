//! Compute resources reserved for a receive adapter
use crate::{Error, Result};
use k8s_openapi::{api::core::v1::ResourceRequirements, apimachinery::pkg::api::resource::Quantity};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A cpu and memory pair
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceQuantities {
    /// CPU in millicores
    pub cpu_millis: u32,
    /// Memory in mebibytes
    pub memory_mib: u32,
}

impl ResourceQuantities {
    /// Construct from millicores and mebibytes
    pub const fn new(cpu_millis: u32, memory_mib: u32) -> Self {
        Self { cpu_millis, memory_mib }
    }

    fn to_resource_list(self) -> BTreeMap<String, Quantity> {
        BTreeMap::from([
            ("cpu".to_string(), Quantity(format!("{}m", self.cpu_millis))),
            ("memory".to_string(), Quantity(format!("{}Mi", self.memory_mib))),
        ])
    }
}

/// Requests and limits for the adapter container
///
/// Every profile satisfies `0 < requests <= limits` for both cpu and memory.
/// The fields are private so that the only way around [`ResourceProfile::default`]
/// is through the checks in [`ResourceProfile::new`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceProfile {
    requests: ResourceQuantities,
    limits: ResourceQuantities,
}

/// Low requests with generous limits
///
/// NB: this is a fixed policy for every source; sources that need more
/// should pass a [`ResourceProfile::new`] override through their args.
impl Default for ResourceProfile {
    fn default() -> Self {
        Self {
            requests: ResourceQuantities::new(125, 64),
            limits: ResourceQuantities::new(1000, 2048),
        }
    }
}

impl ResourceProfile {
    /// Validate and construct a custom profile
    pub fn new(requests: ResourceQuantities, limits: ResourceQuantities) -> Result<Self> {
        if requests.cpu_millis == 0 || requests.memory_mib == 0 {
            return Err(Error::InvalidResources("requests must be non-zero".into()));
        }
        if limits.cpu_millis < requests.cpu_millis {
            return Err(Error::InvalidResources(format!(
                "cpu limit {}m is below request {}m",
                limits.cpu_millis, requests.cpu_millis
            )));
        }
        if limits.memory_mib < requests.memory_mib {
            return Err(Error::InvalidResources(format!(
                "memory limit {}Mi is below request {}Mi",
                limits.memory_mib, requests.memory_mib
            )));
        }
        Ok(Self { requests, limits })
    }

    /// The requested quantities
    pub fn requests(&self) -> ResourceQuantities {
        self.requests
    }

    /// The limit quantities
    pub fn limits(&self) -> ResourceQuantities {
        self.limits
    }

    /// Render as container resource requirements
    pub fn to_requirements(&self) -> ResourceRequirements {
        ResourceRequirements {
            requests: Some(self.requests.to_resource_list()),
            limits: Some(self.limits.to_resource_list()),
            ..ResourceRequirements::default()
        }
    }
}

impl<'de> Deserialize<'de> for ResourceProfile {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            requests: ResourceQuantities,
            limits: ResourceQuantities,
        }
        let raw = Raw::deserialize(deserializer)?;
        ResourceProfile::new(raw.requests, raw.limits).map_err(serde::de::Error::custom)
    }
}
