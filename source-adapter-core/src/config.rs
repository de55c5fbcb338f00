//! Process-wide operator configuration
//!
//! These values are shared by every source the operator manages. They are read once,
//! at process start, and then copied into each [`AdapterArgs`](crate::AdapterArgs).
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Environment variable holding the namespace the operator runs in
pub const SYSTEM_NAMESPACE_ENV: &str = "SYSTEM_NAMESPACE";
/// Environment variable holding the serialized metrics config
pub const METRICS_CONFIG_ENV: &str = "K_METRICS_CONFIG";
/// Environment variable holding the serialized logging config
pub const LOGGING_CONFIG_ENV: &str = "K_LOGGING_CONFIG";
/// Environment variable holding the serialized leader election config
pub const LEADER_ELECTION_CONFIG_ENV: &str = "K_LEADER_ELECTION_CONFIG";

/// Operator settings handed down to every receive adapter
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OperatorConfig {
    /// Namespace of the operator itself
    pub system_namespace: String,
    /// Serialized metrics config, empty when unset
    pub metrics_config: String,
    /// Serialized logging config, empty when unset
    pub logging_config: String,
    /// Serialized leader election config, empty when unset
    pub leader_election_config: String,
}

impl OperatorConfig {
    /// Load from the process environment
    ///
    /// Only `SYSTEM_NAMESPACE` is required; the serialized configs default to empty.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let system_namespace = lookup(SYSTEM_NAMESPACE_ENV)
            .filter(|ns| !ns.is_empty())
            .ok_or(Error::MissingEnv(SYSTEM_NAMESPACE_ENV))?;
        let config = Self {
            system_namespace,
            metrics_config: lookup(METRICS_CONFIG_ENV).unwrap_or_default(),
            logging_config: lookup(LOGGING_CONFIG_ENV).unwrap_or_default(),
            leader_election_config: lookup(LEADER_ELECTION_CONFIG_ENV).unwrap_or_default(),
        };
        tracing::debug!(
            system_namespace = %config.system_namespace,
            metrics = !config.metrics_config.is_empty(),
            logging = !config.logging_config.is_empty(),
            leader_election = !config.leader_election_config.is_empty(),
            "loaded operator config"
        );
        Ok(config)
    }
}
