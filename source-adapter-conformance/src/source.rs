//! Audit of the source observer cluster role
//!
//! Every source CRD is expected to ship a cluster role along these lines,
//! which is aggregated into the roles of components that watch all sources:
//!
//! ```yaml
//! kind: ClusterRole
//! apiVersion: rbac.authorization.k8s.io/v1
//! metadata:
//!   name: eventing-sources-source-observer
//!   labels:
//!     duck.knative.dev/source: "true"
//! rules:
//!   - apiGroups:
//!       - example.com
//!     resources:
//!       - foos
//!     verbs:
//!       - get
//!       - list
//!       - watch
//! ```
//!
//! A rule listing the source's plural is required. Granting `get`, `list` and `watch`
//! on it is recommended and reported separately.
use crate::{
    report::{ConformanceReport, Level, Outcome},
    Error, Result,
};
use k8s_openapi::{
    api::rbac::v1::{ClusterRole, PolicyRule},
    apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition,
};
use kube::{
    api::{Api, ApiResource, ListParams},
    core::{discovery::verbs, GroupVersionKind},
    Client,
};
use source_adapter_core::SourceIdentity;

/// Name of the cluster role granting read access to sources
pub const SOURCE_OBSERVER_ROLE: &str = "eventing-sources-source-observer";
/// Label marking a cluster role for aggregation into the source observer
pub const SOURCE_DUCK_LABEL: &str = "duck.knative.dev/source";

const OBSERVER_VERBS: [&str; 3] = [verbs::GET, verbs::LIST, verbs::WATCH];
const REQUIREMENT: &str = "source CRD has a source observer cluster role";
const VERBS_REQUIREMENT: &str = "source observer cluster role grants get, list and watch";

/// How a missing source observer role is treated
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Enforcement {
    /// Record an advisory finding and carry on
    ///
    /// Sources are told they MUST install the role, but existing installations
    /// are not held to it.
    #[default]
    Advisory,
    /// Fail the audit with [`Error::MissingClusterRole`]
    Strict,
}

/// Guess the plural resource name of a kind
///
/// Lower-cases the kind and applies the usual English pluralisation rules.
/// This can be wrong for CRDs with irregular plurals; [`SourceAuditor::resolve_plural`]
/// prefers the plural recorded in the CRD itself.
pub fn guess_plural(gvk: &GroupVersionKind) -> String {
    ApiResource::from_gvk(gvk).plural
}

/// Whether a rule covers the given resource
pub fn rule_observes(rule: &PolicyRule, plural: &str) -> bool {
    rule.resources
        .as_deref()
        .unwrap_or_default()
        .iter()
        .any(|r| r == plural)
}

/// Whether a rule covering the given resource also grants get, list and watch on it
pub fn rule_grants_observer_verbs(rule: &PolicyRule, plural: &str) -> bool {
    let grants = |verb: &str| rule.verbs.iter().any(|v| v == verb || v == "*");
    rule_observes(rule, plural) && OBSERVER_VERBS.iter().all(|verb| grants(verb))
}

/// Whether any rule of a cluster role covers the given resource
pub fn role_observes(role: &ClusterRole, plural: &str) -> bool {
    role.rules
        .as_deref()
        .unwrap_or_default()
        .iter()
        .any(|rule| rule_observes(rule, plural))
}

/// Whether any rule of a cluster role grants get, list and watch on the given resource
pub fn role_grants_observer_verbs(role: &ClusterRole, plural: &str) -> bool {
    role.rules
        .as_deref()
        .unwrap_or_default()
        .iter()
        .any(|rule| rule_grants_observer_verbs(rule, plural))
}

/// Checks that source CRDs come with a source observer cluster role
#[derive(Clone)]
pub struct SourceAuditor {
    client: Client,
    enforcement: Enforcement,
}

impl SourceAuditor {
    /// Create an auditor with [`Enforcement::Advisory`]
    pub fn new(client: Client) -> Self {
        Self {
            client,
            enforcement: Enforcement::default(),
        }
    }

    /// Set how a missing role is treated
    #[must_use]
    pub fn enforcement(mut self, enforcement: Enforcement) -> Self {
        self.enforcement = enforcement;
        self
    }

    /// Find the plural resource name of a source kind
    ///
    /// Looks up the CRD named after the guessed plural and returns the plural it declares.
    /// Falls back to the guess when no such CRD exists.
    pub async fn resolve_plural(&self, gvk: &GroupVersionKind) -> Result<String> {
        let guess = guess_plural(gvk);
        let crd_name = format!("{guess}.{}", gvk.group);
        let crds: Api<CustomResourceDefinition> = Api::all(self.client.clone());
        match crds.get(&crd_name).await {
            Ok(crd) => Ok(crd.spec.names.plural),
            Err(kube::Error::Api(ae)) if ae.code == 404 => {
                tracing::warn!(crd = %crd_name, "crd not found, using guessed plural");
                Ok(guess)
            }
            Err(e) => Err(Error::Kube(e)),
        }
    }

    /// Audit the source observer role for a source kind
    pub async fn audit(&self, gvk: &GroupVersionKind) -> Result<ConformanceReport> {
        let plural = self.resolve_plural(gvk).await?;
        let mut report = ConformanceReport::new(format!("{plural}.{}", gvk.group));
        tracing::debug!(subject = %report.subject, "auditing source observer role");

        let roles: Api<ClusterRole> = Api::all(self.client.clone());
        let lp = ListParams::default()
            .fields(&format!("metadata.name={SOURCE_OBSERVER_ROLE}"))
            .labels(&format!("{SOURCE_DUCK_LABEL}=true"));
        let observers: Vec<ClusterRole> = roles
            .list(&lp)
            .await
            .map_err(Error::Kube)?
            .items
            .into_iter()
            .filter(|role| role_observes(role, &plural))
            .collect();

        if observers.is_empty() {
            if self.enforcement == Enforcement::Strict {
                return Err(Error::MissingClusterRole { plural });
            }
            let detail = format!("no {SOURCE_OBSERVER_ROLE} role lists {plural}");
            report.record(REQUIREMENT, Level::Must, Outcome::Advisory, Some(detail));
        } else {
            report.record(REQUIREMENT, Level::Must, Outcome::Pass, None);
            if observers.iter().any(|role| role_grants_observer_verbs(role, &plural)) {
                report.record(VERBS_REQUIREMENT, Level::Should, Outcome::Pass, None);
            } else {
                let detail = format!("{SOURCE_OBSERVER_ROLE} lists {plural} without all of get, list and watch");
                report.record(VERBS_REQUIREMENT, Level::Should, Outcome::Advisory, Some(detail));
            }
        }
        tracing::info!(
            subject = %report.subject,
            conformant = report.is_conformant(),
            "source observer audit complete"
        );
        Ok(report)
    }

    /// Audit the source observer role for the kind of a source object
    pub async fn audit_source(&self, source: &SourceIdentity) -> Result<ConformanceReport> {
        let gvk = source.gvk().map_err(Error::InvalidSource)?;
        self.audit(&gvk).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observer_role(yaml: &str) -> ClusterRole {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn guesses_regular_plurals() {
        let gvk = |kind: &str| GroupVersionKind::gvk("example.com", "v1", kind);
        assert_eq!(guess_plural(&gvk("Foo")), "foos");
        assert_eq!(guess_plural(&gvk("PingSource")), "pingsources");
        assert_eq!(guess_plural(&gvk("Policy")), "policies");
        assert_eq!(guess_plural(&gvk("Box")), "boxes");
    }

    #[test]
    fn role_listing_resource_with_read_verbs_observes() {
        let role = observer_role(
            r#"
apiVersion: rbac.authorization.k8s.io/v1
kind: ClusterRole
metadata:
  name: eventing-sources-source-observer
  labels:
    duck.knative.dev/source: "true"
rules:
- apiGroups: [example.com]
  resources: [bars]
  verbs: [get, list, watch]
- apiGroups: [example.com]
  resources: [foos, foos/status]
  verbs: [get, list, watch]
"#,
        );
        assert!(role_observes(&role, "foos"));
        assert!(role_observes(&role, "bars"));
        assert!(!role_observes(&role, "bazs"));
    }

    #[test]
    fn listed_resource_observes_regardless_of_verbs() {
        let role = observer_role(
            r#"
apiVersion: rbac.authorization.k8s.io/v1
kind: ClusterRole
metadata:
  name: eventing-sources-source-observer
rules:
- resources: [foos]
  verbs: [get]
- resources: [bars]
  verbs: ["*"]
"#,
        );
        assert!(role_observes(&role, "foos"));
        assert!(!role_grants_observer_verbs(&role, "foos"));
        assert!(role_observes(&role, "bars"));
        assert!(role_grants_observer_verbs(&role, "bars"));
    }

    #[test]
    fn role_without_rules_observes_nothing() {
        assert!(!role_observes(&ClusterRole::default(), "foos"));
        assert!(!role_grants_observer_verbs(&ClusterRole::default(), "foos"));
    }
}
