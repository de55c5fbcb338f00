//! Deterministic names for synthesized objects

/// Name of the receive adapter owned by a source
///
/// The uid keeps names unique across a delete/recreate of a source with the same name.
/// Nothing is truncated; the result must stay within the 253 character object name limit.
pub fn name(kind_slug: &str, source_name: &str, source_uid: &str) -> String {
    format!("{kind_slug}-{source_name}-{source_uid}")
}

#[cfg(test)]
mod tests {
    use super::name;

    #[test]
    fn joins_slug_name_and_uid() {
        assert_eq!(
            name("pingsource", "source-name", "source-uid"),
            "pingsource-source-name-source-uid"
        );
    }

    #[test]
    fn recreated_source_gets_a_new_name() {
        assert_ne!(name("pingsource", "a", "uid-1"), name("pingsource", "a", "uid-2"));
    }
}
