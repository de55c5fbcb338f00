use kube_core::gvk::ParseGroupVersionError;
use thiserror::Error;

/// Possible errors when preparing the inputs to adapter synthesis
///
/// Synthesis itself never fails; these are raised at the edges where
/// operator configuration is loaded or overrides are validated.
#[derive(Error, Debug)]
pub enum Error {
    /// A required environment variable was not set
    #[error("required environment variable {0} is not set")]
    MissingEnv(&'static str),

    /// A resource profile override was rejected
    #[error("invalid resource profile: {0}")]
    InvalidResources(String),

    /// The source's apiVersion could not be split into group and version
    #[error("invalid source apiVersion: {0}")]
    ParseGroupVersion(#[source] ParseGroupVersionError),
}
