//! # Create Flows
//!
//! Hierarchical creation through the service: ancestor materialization,
//! prefix reuse, duplicates and input validation.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use toggle_hierarchy::{
        build_toggle_path, codes, parse_toggle_path, ErrorPayload, ToggleError,
        ToggleLifecycleApi, ToggleStore,
    };

    use crate::support::{app_id, harness, stored, APP, OTHER_APP, T0};

    #[test]
    fn test_fresh_path_creates_three_linked_levels() {
        let h = harness();

        h.service.create_toggle("a.b.c", false, false, APP).unwrap();

        let all = h.store.get_by_app_id(&app_id(APP)).unwrap();
        assert_eq!(all.len(), 3);

        let a = stored(&*h.store, "a", APP);
        let b = stored(&*h.store, "a.b", APP);
        let c = stored(&*h.store, "a.b.c", APP);

        assert_eq!((a.level, b.level, c.level), (0, 1, 2));
        assert_eq!(a.parent_id, None);
        assert_eq!(b.parent_id, Some(a.id));
        assert_eq!(c.parent_id, Some(b.id));
        assert_eq!((a.value.as_str(), b.value.as_str(), c.value.as_str()), ("a", "b", "c"));

        assert!(a.enabled && a.editable);
        assert!(b.enabled && b.editable);
        assert!(!c.enabled && !c.editable);
        assert!(all.iter().all(|t| t.created_at == T0));
    }

    #[test]
    fn test_sibling_path_reuses_existing_ancestors() {
        let h = harness();
        h.service.create_toggle("a.b.c", true, true, APP).unwrap();
        let a_before = stored(&*h.store, "a", APP);
        let b_before = stored(&*h.store, "a.b", APP);

        let d = h.service.create_toggle("a.b.d", false, true, APP).unwrap();

        assert_eq!(h.store.get_by_app_id(&app_id(APP)).unwrap().len(), 4);
        assert_eq!(stored(&*h.store, "a", APP), a_before);
        assert_eq!(stored(&*h.store, "a.b", APP), b_before);
        assert_eq!(d.parent_id, Some(b_before.id));
    }

    #[test]
    fn test_existing_ancestor_flags_are_not_overwritten() {
        let h = harness();
        h.service.create_toggle("a", false, false, APP).unwrap();

        h.service.create_toggle("a.b", true, true, APP).unwrap();

        let a = stored(&*h.store, "a", APP);
        assert!(!a.enabled);
        assert!(!a.editable);
        assert!(!h.service.get_toggle_status("a.b", APP).unwrap());
    }

    #[test]
    fn test_duplicate_terminal_is_already_exists() {
        let h = harness();
        h.service.create_toggle("a.b.c", true, true, APP).unwrap();

        let err = h.service.create_toggle("a.b.c", true, true, APP).unwrap_err();
        assert!(matches!(err, ToggleError::AlreadyExists(_)));
        assert_eq!(ErrorPayload::from(&err).code, codes::ALREADY_EXISTS);

        // An intermediate created implicitly is a terminal path too.
        let err = h.service.create_toggle("a.b", true, true, APP).unwrap_err();
        assert!(matches!(err, ToggleError::AlreadyExists(_)));
    }

    #[test]
    fn test_same_path_in_two_apps() {
        let h = harness();
        h.service.create_toggle("a.b", true, true, APP).unwrap();
        h.service.create_toggle("a.b", false, true, OTHER_APP).unwrap();

        assert_eq!(h.store.len(), 4);
        assert!(h.service.get_toggle_status("a.b", APP).unwrap());
        assert!(!h.service.get_toggle_status("a.b", OTHER_APP).unwrap());
    }

    #[test]
    fn test_invalid_inputs_touch_nothing() {
        let h = harness();

        for path in ["", "  ", ".a", "a.", "a..b", "a.b c", "a/b"] {
            let err = h.service.create_toggle(path, true, true, APP).unwrap_err();
            assert!(matches!(err, ToggleError::Validation { .. }), "{path:?}");
        }
        let err = h.service.create_toggle("a", true, true, "").unwrap_err();
        assert!(matches!(err, ToggleError::Validation { .. }));

        let err = h.service.create_toggle("a", true, true, "unknown").unwrap_err();
        assert_eq!(err, ToggleError::not_found("application not found"));

        assert!(h.store.is_empty());
    }

    #[test]
    fn test_validation_payload_lists_every_violation() {
        let h = harness();
        let err = h.service.create_toggle(".a..b c", true, true, APP).unwrap_err();
        let payload = ErrorPayload::from(&err);

        assert_eq!(payload.code, codes::VALIDATION);
        assert!(payload.details.len() >= 4);
        assert!(payload
            .details
            .iter()
            .all(|d| d.field == "path" && d.code.as_deref() == Some(codes::INVALID_PATH)));

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["message"], "validation failed");
    }

    #[test]
    fn test_removed_application_rejects_create() {
        let h = harness();
        h.directory.remove(&app_id(APP));
        let err = h.service.create_toggle("a", true, true, APP).unwrap_err();
        assert!(matches!(err, ToggleError::NotFound(_)));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn test_created_leaf_path_roundtrips(
            segments in prop::collection::vec("[a-zA-Z0-9_-]{1,10}", 1..6)
        ) {
            let h = harness();
            let path = build_toggle_path(&segments);
            prop_assert_eq!(build_toggle_path(&parse_toggle_path(&path)), path.clone());

            let leaf = h.service.create_toggle(&path, true, false, APP).unwrap();
            prop_assert_eq!(&leaf.path, &path);
            prop_assert_eq!(leaf.level as usize, segments.len() - 1);
            prop_assert_eq!(h.store.len(), segments.len());
        }
    }
}
