//! Label sets attached to receive adapters
//!
//! Selector labels bind the deployment to its pods and must never change for the
//! lifetime of an adapter. Informational labels are free-form and may change on any pass.
use std::collections::BTreeMap;

// local type alias
type Map = BTreeMap<String, String>;

/// Label naming the controller that owns the adapter
pub const SOURCE_LABEL: &str = "eventing.knative.dev/source";
/// Label naming the source object an adapter serves
pub const SOURCE_NAME_LABEL: &str = "eventing.knative.dev/sourceName";

/// The labels used to match an adapter's pods
///
/// Used verbatim as both the deployment selector and the pod template labels.
///
/// The source name is used as a label value as-is. Label values are limited to 63
/// characters, so the apiserver rejects the adapter of a source with a longer name.
pub fn selector_labels(kind_slug: &str, source_name: &str) -> Map {
    BTreeMap::from([
        (SOURCE_LABEL.to_string(), format!("{kind_slug}-controller")),
        (SOURCE_NAME_LABEL.to_string(), source_name.to_string()),
    ])
}

/// Caller supplied labels that take no part in matching
pub fn informational_labels(extra: &Map) -> Map {
    extra.clone()
}

/// Labels for the deployment's own metadata
///
/// Selector keys win over informational ones so that a caller cannot shadow them.
pub fn merged(selector: &Map, informational: &Map) -> Map {
    let mut labels = informational.clone();
    labels.extend(selector.iter().map(|(k, v)| (k.clone(), v.clone())));
    labels
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_source_names_are_not_shortened() {
        let long = "s".repeat(64);
        let sel = selector_labels("pingsource", &long);
        assert_eq!(sel[SOURCE_NAME_LABEL], long);
    }

    #[test]
    fn selector_has_fixed_keys() {
        let sel = selector_labels("pingsource", "source-name");
        assert_eq!(sel.len(), 2);
        assert_eq!(sel[SOURCE_LABEL], "pingsource-controller");
        assert_eq!(sel[SOURCE_NAME_LABEL], "source-name");
    }

    #[test]
    fn selector_keys_win_on_collision() {
        let sel = selector_labels("pingsource", "source-name");
        let extra = BTreeMap::from([
            (SOURCE_NAME_LABEL.to_string(), "spoofed".to_string()),
            ("team".to_string(), "events".to_string()),
        ]);
        let labels = merged(&sel, &informational_labels(&extra));
        assert_eq!(labels[SOURCE_NAME_LABEL], "source-name");
        assert_eq!(labels["team"], "events");
        assert_eq!(labels.len(), 3);
    }
}
