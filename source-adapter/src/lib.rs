//! Source-adapter is an umbrella-crate for running event sources on Kubernetes.
//!
//! # Overview
//!
//! An event source is a custom resource; for each source object, the source's controller runs
//! a receive adapter: a single-replica `Deployment` that reads the source's configuration and
//! emits events. This crate helps with both halves of getting that right:
//!
//! - [`core`](crate::core) with the pure synthesis of the adapter `Deployment`
//!   from a [`SourceIdentity`] and [`AdapterArgs`]
//! - [`conformance`](crate::conformance) with read-only audits of the CRD and RBAC shape
//!   that sources and channels must install
//!
//! # Synthesizing an adapter
//!
//! ```
//! use source_adapter::{make_receive_adapter, AdapterArgs, OperatorConfig, SourceIdentity};
//!
//! // Loaded once, at process start
//! let operator = OperatorConfig::from_lookup(|key| match key {
//!     "SYSTEM_NAMESPACE" => Some("knative-eventing".into()),
//!     _ => None,
//! })?;
//!
//! // Recomputed on every reconcile
//! let source = SourceIdentity::new(
//!     "PingSource",
//!     "sources.knative.dev/v1beta1",
//!     "ticker",
//!     "default",
//!     "6f0bd5c2",
//! );
//! let args = AdapterArgs::new("gcr.io/knative-releases/ping-adapter")
//!     .operator(&operator)
//!     .service_account("pingsource-adapter")
//!     .no_shutdown_after(40);
//! let desired = make_receive_adapter(&args, &source);
//! assert_eq!(desired.metadata.name.as_deref(), Some("pingsource-ticker-6f0bd5c2"));
//! # Ok::<(), source_adapter::core::Error>(())
//! ```
//!
//! The desired object is handed to the caller's reconciler, which creates or updates it
//! and handles conflicts and retries.
#![cfg_attr(docsrs, feature(doc_cfg))]

macro_rules! cfg_conformance {
    ($($item:item)*) => {
        $(
            #[cfg_attr(docsrs, doc(cfg(feature = "conformance")))]
            #[cfg(feature = "conformance")]
            $item
        )*
    }
}

cfg_conformance! {
    pub use source_adapter_conformance as conformance;
    pub use kube;

    #[doc(inline)]
    pub use conformance::{ChannelAuditor, ConformanceReport, Enforcement, SourceAuditor};
}

pub use crate::core::{
    make_receive_adapter, AdapterArgs, OperatorConfig, ResourceProfile, ResourceQuantities, SourceIdentity,
};
/// Re-exports from [`source_adapter_core`](source_adapter_core)
#[doc(inline)]
pub use source_adapter_core as core;

#[cfg(test)]
mod test {
    use crate::{make_receive_adapter, AdapterArgs, OperatorConfig, SourceIdentity};
    use k8s_openapi::api::apps::v1::Deployment;

    fn operator() -> OperatorConfig {
        serde_yaml::from_str(
            r#"
systemNamespace: knative-eventing
metricsConfig: '{"domain":"knative.dev/sources"}'
loggingConfig: '{"zap-logger-config":"{}"}'
"#,
        )
        .unwrap()
    }

    #[test]
    fn recreated_source_gets_distinct_adapter() {
        let args = AdapterArgs::new("adapter").operator(&operator());
        let first = SourceIdentity::new("PingSource", "sources.knative.dev/v1", "ticker", "default", "uid-1");
        let second = SourceIdentity { uid: "uid-2".into(), ..first.clone() };
        let a = make_receive_adapter(&args, &first);
        let b = make_receive_adapter(&args, &second);
        assert_ne!(a.metadata.name, b.metadata.name);
        // only identity-derived fields differ
        assert_eq!(a.spec, b.spec);
    }

    #[test]
    fn operator_config_reaches_the_container() {
        let args = AdapterArgs::new("adapter").operator(&operator());
        let source = SourceIdentity::new("PingSource", "sources.knative.dev/v1", "ticker", "default", "uid");
        let dep: Deployment = make_receive_adapter(&args, &source);
        let pod = dep.spec.unwrap().template.spec.unwrap();
        let env = pod.containers[0].env.clone().unwrap();
        let value = |name: &str| env.iter().find(|e| e.name == name).and_then(|e| e.value.clone());
        assert_eq!(value("SYSTEM_NAMESPACE").as_deref(), Some("knative-eventing"));
        assert_eq!(value("K_METRICS_CONFIG").as_deref(), Some(r#"{"domain":"knative.dev/sources"}"#));
        assert_eq!(value("K_LEADER_ELECTION_CONFIG").as_deref(), Some(""));
    }

    #[cfg(feature = "conformance")]
    #[test]
    fn identity_feeds_the_source_audit() {
        let source = SourceIdentity::new("Foo", "example.com/v1", "foo", "default", "uid");
        let gvk = source.gvk().unwrap();
        assert_eq!(crate::conformance::source::guess_plural(&gvk), "foos");
    }
}
