//! Identity of the source object that owns a receive adapter
use crate::{Error, Result};
use kube_core::{gvk::ParseGroupVersionError, GroupVersion, GroupVersionKind, Resource};
use serde::{Deserialize, Serialize};

/// The owning custom resource of a receive adapter
///
/// This is everything synthesis needs to know about the source object itself:
/// enough to name the adapter, place it, and point an owner reference back at it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceIdentity {
    /// Kind of the source, e.g. `PingSource`
    pub kind: String,
    /// apiVersion of the source, e.g. `sources.knative.dev/v1beta1`
    pub api_version: String,
    /// Name of the source object
    pub name: String,
    /// Namespace of the source object
    pub namespace: String,
    /// Unique ID of the source object
    ///
    /// Distinguishes a recreated source from its deleted namesake.
    pub uid: String,
}

impl SourceIdentity {
    /// Construct from explicit kind, apiVersion, name, namespace and uid
    pub fn new(
        kind: impl Into<String>,
        api_version: impl Into<String>,
        name: impl Into<String>,
        namespace: impl Into<String>,
        uid: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            api_version: api_version.into(),
            name: name.into(),
            namespace: namespace.into(),
            uid: uid.into(),
        }
    }

    /// Extract the identity of a resource as received from the apiserver
    ///
    /// Returns `None` when the object lacks a name, namespace or uid,
    /// which is only the case for objects constructed locally.
    pub fn from_resource<K: Resource>(obj: &K, dt: &K::DynamicType) -> Option<Self> {
        let meta = obj.meta();
        Some(Self {
            kind: K::kind(dt).into_owned(),
            api_version: K::api_version(dt).into_owned(),
            name: meta.name.clone()?,
            namespace: meta.namespace.clone()?,
            uid: meta.uid.clone()?,
        })
    }

    /// The lower-cased kind, used as a prefix for names and label values
    pub fn kind_slug(&self) -> String {
        self.kind.to_ascii_lowercase()
    }

    /// Split the apiVersion and pair it with the kind
    ///
    /// Fails unless the apiVersion is `{group}/{version}` or a bare `{version}`.
    pub fn gvk(&self) -> Result<GroupVersionKind> {
        let gv: GroupVersion = self.api_version.parse().map_err(Error::ParseGroupVersion)?;
        if gv.version.is_empty() || gv.version.contains('/') {
            return Err(Error::ParseGroupVersion(ParseGroupVersionError(self.api_version.clone())));
        }
        Ok(GroupVersionKind::gvk(&gv.group, &gv.version, &self.kind))
    }
}

#[cfg(test)]
mod tests {
    use super::SourceIdentity;
    use k8s_openapi::{api::core::v1::ConfigMap, apimachinery::pkg::apis::meta::v1::ObjectMeta};

    #[test]
    fn kind_slug_is_lowercase() {
        let id = SourceIdentity::new("PingSource", "sources.knative.dev/v1beta1", "n", "ns", "u");
        assert_eq!(id.kind_slug(), "pingsource");
    }

    #[test]
    fn gvk_splits_group_and_version() {
        let id = SourceIdentity::new("PingSource", "sources.knative.dev/v1beta1", "n", "ns", "u");
        let gvk = id.gvk().unwrap();
        assert_eq!(gvk.group, "sources.knative.dev");
        assert_eq!(gvk.version, "v1beta1");
        assert_eq!(gvk.kind, "PingSource");

        let core = SourceIdentity::new("ConfigMap", "v1", "n", "ns", "u").gvk().unwrap();
        assert_eq!(core.group, "");
        assert_eq!(core.version, "v1");
    }

    #[test]
    fn gvk_rejects_malformed_api_version() {
        for api_version in ["a/b/c", "example.com/", ""] {
            let id = SourceIdentity::new("Foo", api_version, "n", "ns", "u");
            assert!(matches!(id.gvk(), Err(crate::Error::ParseGroupVersion(_))), "{api_version}");
        }
    }

    #[test]
    fn from_resource_requires_server_populated_fields() {
        let mut cm = ConfigMap {
            metadata: ObjectMeta {
                name: Some("cfg".into()),
                namespace: Some("default".into()),
                ..ObjectMeta::default()
            },
            ..ConfigMap::default()
        };
        assert_eq!(SourceIdentity::from_resource(&cm, &()), None);

        cm.metadata.uid = Some("1234".into());
        let id = SourceIdentity::from_resource(&cm, &()).unwrap();
        assert_eq!(id, SourceIdentity::new("ConfigMap", "v1", "cfg", "default", "1234"));
    }
}
