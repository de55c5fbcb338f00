//! Error handling in [`source-adapter-conformance`][crate]
use thiserror::Error;

/// Possible errors when auditing a cluster
///
/// Requirements that are not met are recorded as findings in a
/// [`ConformanceReport`](crate::ConformanceReport); errors are reserved for
/// audits that could not be carried out at all.
#[derive(Error, Debug)]
pub enum Error {
    /// The apiserver could not be queried
    #[error("api request failed: {0}")]
    Kube(#[source] kube::Error),

    /// The source identity could not be turned into a group/version/kind
    #[error("invalid source identity: {0}")]
    InvalidSource(#[source] source_adapter_core::Error),

    /// No source observer cluster role grants access to the source
    ///
    /// Only raised under [`Enforcement::Strict`](crate::Enforcement::Strict).
    #[error("no source observer cluster role grants get/list/watch on {plural}")]
    MissingClusterRole {
        /// The plural resource name that was looked for
        plural: String,
    },

    /// A SubjectAccessReview came back without a status
    #[error("access review for {user} returned no status")]
    IncompleteReview {
        /// The user the review was made for
        user: String,
    },
}

/// Convient alias for `Result<T, Error>`
pub type Result<T, E = Error> = std::result::Result<T, E>;
