//! Operational parameters for a receive adapter
use crate::{OperatorConfig, ResourceProfile};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Everything a receive adapter needs besides the identity of its source
///
/// Constructed fresh on every reconcile from the source spec and the operator's
/// [`OperatorConfig`]. Unset string fields are empty and are still passed on to
/// the adapter as empty values.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdapterArgs {
    /// Service account the adapter pods run as
    pub service_account_name: String,
    /// Name of the adapter binary, for the caller's bookkeeping
    pub adapter_name: String,
    /// Container image of the adapter
    pub image: String,
    /// Namespace of the operator, see [`OperatorConfig::system_namespace`]
    pub system_namespace: String,
    /// Serialized metrics config
    pub metrics_config: String,
    /// Serialized logging config
    pub logging_config: String,
    /// Serialized leader election config
    pub leader_election_config: String,
    /// Seconds the adapter keeps running without shutting down
    pub no_shutdown_after: u64,
    /// Labels added to the deployment that take no part in matching
    pub labels: BTreeMap<String, String>,
    /// Requests and limits for the adapter container
    pub resources: ResourceProfile,
}

/// Builder interface to AdapterArgs
///
/// Usage:
/// ```
/// use source_adapter_core::{AdapterArgs, OperatorConfig};
/// let operator = OperatorConfig {
///     system_namespace: "knative-eventing".into(),
///     ..OperatorConfig::default()
/// };
/// let args = AdapterArgs::new("gcr.io/adapter:v1")
///     .operator(&operator)
///     .service_account("ping-adapter")
///     .label("team", "events");
/// assert_eq!(args.system_namespace, "knative-eventing");
/// ```
impl AdapterArgs {
    /// Start from an image with everything else at defaults
    pub fn new(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            ..Self::default()
        }
    }

    /// Copy the process-wide settings from the operator config
    #[must_use]
    pub fn operator(mut self, config: &OperatorConfig) -> Self {
        self.system_namespace = config.system_namespace.clone();
        self.metrics_config = config.metrics_config.clone();
        self.logging_config = config.logging_config.clone();
        self.leader_election_config = config.leader_election_config.clone();
        self
    }

    /// Set the service account of the adapter pods
    #[must_use]
    pub fn service_account(mut self, name: impl Into<String>) -> Self {
        self.service_account_name = name.into();
        self
    }

    /// Set the adapter name
    #[must_use]
    pub fn adapter_name(mut self, name: impl Into<String>) -> Self {
        self.adapter_name = name.into();
        self
    }

    /// Set the operator namespace
    #[must_use]
    pub fn system_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.system_namespace = namespace.into();
        self
    }

    /// Set the serialized metrics config
    #[must_use]
    pub fn metrics_config(mut self, config: impl Into<String>) -> Self {
        self.metrics_config = config.into();
        self
    }

    /// Set the serialized logging config
    #[must_use]
    pub fn logging_config(mut self, config: impl Into<String>) -> Self {
        self.logging_config = config.into();
        self
    }

    /// Set the serialized leader election config
    #[must_use]
    pub fn leader_election_config(mut self, config: impl Into<String>) -> Self {
        self.leader_election_config = config.into();
        self
    }

    /// Set how many seconds the adapter keeps running
    #[must_use]
    pub fn no_shutdown_after(mut self, seconds: u64) -> Self {
        self.no_shutdown_after = seconds;
        self
    }

    /// Add a single informational label
    #[must_use]
    pub fn label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    /// Replace all informational labels
    #[must_use]
    pub fn labels(mut self, labels: BTreeMap<String, String>) -> Self {
        self.labels = labels;
        self
    }

    /// Override the default resource profile
    #[must_use]
    pub fn resources(mut self, profile: ResourceProfile) -> Self {
        self.resources = profile;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::AdapterArgs;
    use crate::{OperatorConfig, ResourceProfile};

    #[test]
    fn operator_settings_are_copied() {
        let operator = OperatorConfig {
            system_namespace: "knative-eventing".into(),
            metrics_config: "metrics".into(),
            logging_config: "logging".into(),
            leader_election_config: String::new(),
        };
        let args = AdapterArgs::new("img").operator(&operator).no_shutdown_after(40);
        assert_eq!(args.image, "img");
        assert_eq!(args.system_namespace, "knative-eventing");
        assert_eq!(args.metrics_config, "metrics");
        assert_eq!(args.logging_config, "logging");
        assert_eq!(args.no_shutdown_after, 40);
        assert_eq!(args.resources, ResourceProfile::default());
    }

    #[test]
    fn deserializes_with_defaults() {
        let args: AdapterArgs = serde_yaml::from_str(
            r#"
            image: test-image
            serviceAccountName: test-sa
            noShutdownAfter: 40
            labels:
              test-key1: test-value1
            "#,
        )
        .unwrap();
        assert_eq!(args.image, "test-image");
        assert_eq!(args.service_account_name, "test-sa");
        assert_eq!(args.no_shutdown_after, 40);
        assert_eq!(args.labels["test-key1"], "test-value1");
        assert_eq!(args.logging_config, "");
        assert_eq!(args.resources, ResourceProfile::default());
    }
}
