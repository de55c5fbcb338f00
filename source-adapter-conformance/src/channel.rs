//! Audit of the control plane requirements on channel implementations
//!
//! A channel CRD must be namespaced, carry the duck-typing labels, and ship cluster roles
//! that get aggregated into the `channelable-manipulator` and `addressable-resolver` roles.
//! Role aggregation is checked from the outside: the caller binds one service account
//! to each aggregated role, and the auditor asks the apiserver what those accounts may do
//! through [`SubjectAccessReview`]s.
use crate::{
    report::{ConformanceReport, Level, Outcome},
    Error, Result,
};
use k8s_openapi::{
    api::authorization::v1::{ResourceAttributes, SubjectAccessReview, SubjectAccessReviewSpec},
    apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition,
};
use kube::{
    api::{Api, PostParams},
    core::{discovery::verbs, GroupVersionResource},
    Client,
};

/// Label every channel CRD carries to declare itself subscribable
pub const SUBSCRIBABLE_LABEL: &str = "messaging.knative.dev/subscribable";
/// Label every channel CRD carries to declare itself addressable
pub const ADDRESSABLE_LABEL: &str = "duck.knative.dev/addressable";
/// CRD category shared by all channel implementations
pub const CHANNEL_CATEGORY: &str = "channel";

/// Verbs the channelable manipulator role must grant
pub const MANIPULATOR_VERBS: [&str; 5] = [verbs::GET, verbs::LIST, verbs::WATCH, verbs::UPDATE, verbs::PATCH];
/// Verbs the addressable resolver role must grant
pub const RESOLVER_VERBS: [&str; 3] = [verbs::GET, verbs::LIST, verbs::WATCH];

// Checked on the resource itself and on its status subresource
const SUBRESOURCES: [&str; 2] = ["", "status"];

/// Check the CRD-level requirements of a channel
pub fn check_crd(crd: &CustomResourceDefinition, report: &mut ConformanceReport) {
    report.check("each channel is namespaced", Level::Must, crd.spec.scope == "Namespaced", || {
        format!("scope is {}", crd.spec.scope)
    });

    let labels = crd.metadata.labels.clone().unwrap_or_default();
    for key in [SUBSCRIBABLE_LABEL, ADDRESSABLE_LABEL] {
        let requirement = format!("label of {key}: true");
        report.check(&requirement, Level::Must, labels.get(key).map(String::as_str) == Some("true"), || {
            match labels.get(key) {
                Some(got) => format!("label {key} is {got}"),
                None => format!("label {key} is missing"),
            }
        });
    }

    let has_category = crd
        .spec
        .names
        .categories
        .as_deref()
        .unwrap_or_default()
        .iter()
        .any(|c| c == CHANNEL_CATEGORY);
    let requirement = "the category `channel`";
    if has_category {
        report.record(requirement, Level::Must, Outcome::Pass, None);
    } else {
        let detail = format!("categories do not include {CHANNEL_CATEGORY}");
        report.record(requirement, Level::Must, Outcome::Advisory, Some(detail));
    }
}

/// Checks channel CRDs and the aggregated roles that expose them
#[derive(Clone)]
pub struct ChannelAuditor {
    client: Client,
    namespace: String,
}

impl ChannelAuditor {
    /// Create an auditor for service accounts in `namespace`
    pub fn new(client: Client, namespace: impl Into<String>) -> Self {
        Self {
            client,
            namespace: namespace.into(),
        }
    }

    fn user(&self, service_account: &str) -> String {
        format!("system:serviceaccount:{}:{service_account}", self.namespace)
    }

    /// Ask the apiserver whether a service account may perform `verb`
    pub async fn service_account_allowed(
        &self,
        gvr: &GroupVersionResource,
        subresource: &str,
        service_account: &str,
        verb: &str,
    ) -> Result<bool> {
        let user = self.user(service_account);
        let review = SubjectAccessReview {
            spec: SubjectAccessReviewSpec {
                user: Some(user.clone()),
                resource_attributes: Some(ResourceAttributes {
                    verb: Some(verb.to_string()),
                    group: Some(gvr.group.clone()),
                    version: Some(gvr.version.clone()),
                    resource: Some(gvr.resource.clone()),
                    subresource: (!subresource.is_empty()).then(|| subresource.to_string()),
                    ..ResourceAttributes::default()
                }),
                ..SubjectAccessReviewSpec::default()
            },
            ..SubjectAccessReview::default()
        };
        let reviews: Api<SubjectAccessReview> = Api::all(self.client.clone());
        let reviewed = reviews
            .create(&PostParams::default(), &review)
            .await
            .map_err(Error::Kube)?;
        let status = reviewed.status.ok_or(Error::IncompleteReview { user })?;
        Ok(status.allowed)
    }

    async fn check_role(
        &self,
        report: &mut ConformanceReport,
        requirement: &str,
        gvr: &GroupVersionResource,
        service_account: &str,
        verbs: &[&str],
    ) -> Result<()> {
        let mut denied = vec![];
        for verb in verbs {
            for subresource in SUBRESOURCES {
                if !self.service_account_allowed(gvr, subresource, service_account, verb).await? {
                    denied.push(match subresource {
                        "" => verb.to_string(),
                        sub => format!("{verb} {sub}"),
                    });
                }
            }
        }
        report.check(requirement, Level::Must, denied.is_empty(), || {
            format!("{} denied: {}", self.user(service_account), denied.join(", "))
        });
        Ok(())
    }

    /// Audit a channel implementation
    ///
    /// `manipulator` and `resolver` name service accounts in the auditor's namespace bound to
    /// the `channelable-manipulator` and `addressable-resolver` cluster roles respectively.
    pub async fn audit(
        &self,
        gvr: &GroupVersionResource,
        manipulator: &str,
        resolver: &str,
    ) -> Result<ConformanceReport> {
        let crd_name = format!("{}.{}", gvr.resource, gvr.group);
        let mut report = ConformanceReport::new(crd_name.clone());
        tracing::debug!(subject = %crd_name, "auditing channel control plane");

        let crds: Api<CustomResourceDefinition> = Api::all(self.client.clone());
        let crd = crds.get(&crd_name).await.map_err(Error::Kube)?;
        check_crd(&crd, &mut report);

        self.check_role(
            &mut report,
            "the channelable manipulator role grants get, list, watch, update and patch",
            gvr,
            manipulator,
            &MANIPULATOR_VERBS,
        )
        .await?;
        self.check_role(
            &mut report,
            "the addressable resolver role grants get, list and watch",
            gvr,
            resolver,
            &RESOLVER_VERBS,
        )
        .await?;

        tracing::info!(
            subject = %report.subject,
            conformant = report.is_conformant(),
            "channel control plane audit complete"
        );
        Ok(report)
    }
}
