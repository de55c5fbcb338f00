//! Crate with the types and pure functions that describe an event source's receive adapter
//!
//! A receive adapter is the single-replica [`Deployment`](k8s_openapi::api::apps::v1::Deployment)
//! that delivers events on behalf of one source object. Everything here is client-less:
//! synthesis takes a [`SourceIdentity`] and [`AdapterArgs`] and returns the desired object,
//! leaving create/update against the apiserver to the caller's reconciler.
//!
//! The same information here is always re-exported from `source-adapter` under `source_adapter::core`.
//!
//! ```
//! use source_adapter_core::{make_receive_adapter, AdapterArgs, SourceIdentity};
//!
//! let source = SourceIdentity::new(
//!     "PingSource",
//!     "sources.knative.dev/v1beta1",
//!     "source-name",
//!     "source-namespace",
//!     "source-uid",
//! );
//! let args = AdapterArgs::new("test-image").no_shutdown_after(40);
//! let deployment = make_receive_adapter(&args, &source);
//! assert_eq!(
//!     deployment.metadata.name.as_deref(),
//!     Some("pingsource-source-name-source-uid")
//! );
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod adapter;
pub use adapter::{make_receive_adapter, CONTAINER_NAME, METRICS_PORT, METRICS_PORT_NAME};

pub mod args;
pub use args::AdapterArgs;

pub mod config;
pub use config::OperatorConfig;

pub mod env;
pub use env::build_env;

pub mod identity;
pub use identity::SourceIdentity;

pub mod labels;

pub mod naming;

pub mod owner;
pub use owner::owner_ref;

pub mod resources;
pub use resources::{ResourceProfile, ResourceQuantities};

mod error;
pub use error::Error;

/// Convient alias for `Result<T, Error>`
pub type Result<T, E = Error> = std::result::Result<T, E>;
