//! Read-only conformance audits for eventing installations
//!
//! Sources and channels are installed as CRDs together with cluster roles that other
//! components rely on. This crate checks, against a live apiserver, that those pieces are
//! in place. Audits never mutate cluster state; unmet requirements are collected in a
//! [`ConformanceReport`] rather than returned as errors.
//!
//! ```no_run
//! use kube::{core::GroupVersionKind, Client};
//! use source_adapter_conformance::{Enforcement, SourceAuditor};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::try_default().await?;
//!     let auditor = SourceAuditor::new(client).enforcement(Enforcement::Advisory);
//!     let gvk = GroupVersionKind::gvk("sources.knative.dev", "v1", "PingSource");
//!     let report = auditor.audit(&gvk).await?;
//!     for finding in report.advisories() {
//!         println!("{}: {:?}", finding.requirement, finding.detail);
//!     }
//!     Ok(())
//! }
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod channel;
pub use channel::ChannelAuditor;

pub mod report;
pub use report::{ConformanceReport, Finding, Level, Outcome};

pub mod source;
pub use source::{Enforcement, SourceAuditor};

mod error;
pub use error::{Error, Result};
