//! Controller ownership of synthesized objects
use crate::SourceIdentity;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::OwnerReference;

/// Generates a controller owner reference pointing to the source
///
/// Both `controller` and `blockOwnerDeletion` are set, so the garbage collector
/// treats the source as the exclusive owner and deletes the adapter along with it.
pub fn owner_ref(source: &SourceIdentity) -> OwnerReference {
    OwnerReference {
        api_version: source.api_version.clone(),
        kind: source.kind.clone(),
        name: source.name.clone(),
        uid: source.uid.clone(),
        controller: Some(true),
        block_owner_deletion: Some(true),
    }
}

#[cfg(test)]
mod tests {
    use super::owner_ref;
    use crate::SourceIdentity;

    #[test]
    fn copies_identity_and_sets_controller() {
        let id = SourceIdentity::new("PingSource", "sources.knative.dev/v1beta1", "src", "ns", "uid");
        let owner = owner_ref(&id);
        assert_eq!(owner.api_version, "sources.knative.dev/v1beta1");
        assert_eq!(owner.kind, "PingSource");
        assert_eq!(owner.name, "src");
        assert_eq!(owner.uid, "uid");
        assert_eq!(owner.controller, Some(true));
        assert_eq!(owner.block_owner_deletion, Some(true));
    }
}
