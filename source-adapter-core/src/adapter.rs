//! Synthesis of the receive adapter deployment
use crate::{build_env, labels, naming, owner_ref, AdapterArgs, SourceIdentity};
use k8s_openapi::{
    api::{
        apps::v1::{Deployment, DeploymentSpec},
        core::v1::{Container, ContainerPort, PodSpec, PodTemplateSpec},
    },
    apimachinery::pkg::apis::meta::v1::{LabelSelector, ObjectMeta},
};

/// Name of the single adapter container
pub const CONTAINER_NAME: &str = "dispatcher";
/// Name of the container port serving metrics
pub const METRICS_PORT_NAME: &str = "metrics";
/// Container port serving metrics
pub const METRICS_PORT: i32 = 9090;

/// Compute the desired receive adapter for a source
///
/// This is a pure function: identical inputs always give an identical `Deployment`,
/// so a level-triggered reconciler can compare it against the live object without
/// seeing spurious drift. It never fails; an empty image still produces a valid object
/// and is left for the scheduler to reject.
///
/// The deployment always runs exactly one replica.
pub fn make_receive_adapter(args: &AdapterArgs, source: &SourceIdentity) -> Deployment {
    let slug = source.kind_slug();
    let selector = labels::selector_labels(&slug, &source.name);
    let name = naming::name(&slug, &source.name, &source.uid);
    tracing::trace!(%name, namespace = %source.namespace, "synthesizing receive adapter");

    Deployment {
        metadata: ObjectMeta {
            name: Some(name),
            namespace: Some(source.namespace.clone()),
            labels: Some(labels::merged(&selector, &labels::informational_labels(&args.labels))),
            owner_references: Some(vec![owner_ref(source)]),
            ..ObjectMeta::default()
        },
        spec: Some(DeploymentSpec {
            replicas: Some(1),
            selector: LabelSelector {
                match_labels: Some(selector.clone()),
                ..LabelSelector::default()
            },
            template: PodTemplateSpec {
                metadata: Some(ObjectMeta {
                    labels: Some(selector),
                    ..ObjectMeta::default()
                }),
                spec: Some(PodSpec {
                    service_account_name: Some(args.service_account_name.clone()),
                    containers: vec![Container {
                        name: CONTAINER_NAME.to_string(),
                        image: Some(args.image.clone()),
                        env: Some(build_env(args)),
                        resources: Some(args.resources.to_requirements()),
                        ports: Some(vec![ContainerPort {
                            name: Some(METRICS_PORT_NAME.to_string()),
                            container_port: METRICS_PORT,
                            ..ContainerPort::default()
                        }]),
                        ..Container::default()
                    }],
                    ..PodSpec::default()
                }),
            },
            ..DeploymentSpec::default()
        }),
        ..Deployment::default()
    }
}
