//! The environment contract between the operator and adapter binaries
//!
//! Adapters read every one of these variables unconditionally, so each is always
//! emitted, in a fixed order, with an empty value when the setting is absent.
use crate::{config, AdapterArgs};
use k8s_openapi::api::core::v1::{EnvVar, EnvVarSource, ObjectFieldSelector};

/// Variable resolved by the kubelet to the pod's own namespace
pub const NAMESPACE_ENV: &str = "NAMESPACE";
/// Variable holding the number of seconds before the adapter may shut down
pub const NO_SHUTDOWN_AFTER_ENV: &str = "K_NO_SHUTDOWN_AFTER";

/// Build the ordered environment for the adapter container
pub fn build_env(args: &AdapterArgs) -> Vec<EnvVar> {
    vec![
        literal(config::SYSTEM_NAMESPACE_ENV, &args.system_namespace),
        EnvVar {
            name: NAMESPACE_ENV.to_string(),
            value_from: Some(EnvVarSource {
                field_ref: Some(ObjectFieldSelector {
                    field_path: "metadata.namespace".to_string(),
                    ..ObjectFieldSelector::default()
                }),
                ..EnvVarSource::default()
            }),
            ..EnvVar::default()
        },
        literal(config::METRICS_CONFIG_ENV, &args.metrics_config),
        literal(config::LOGGING_CONFIG_ENV, &args.logging_config),
        literal(config::LEADER_ELECTION_CONFIG_ENV, &args.leader_election_config),
        literal(NO_SHUTDOWN_AFTER_ENV, &args.no_shutdown_after.to_string()),
    ]
}

fn literal(name: &str, value: &str) -> EnvVar {
    EnvVar {
        name: name.to_string(),
        value: Some(value.to_string()),
        ..EnvVar::default()
    }
}
