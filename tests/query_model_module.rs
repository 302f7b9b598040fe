use flowfilter::catalog::{CatalogSnapshot, SELECT_FILTER_PLACEHOLDER, SEPARATOR_PLACEHOLDER};
use flowfilter::query::{AddOutcome, FilterQuery, FilterTerm, QueryEditError};
use std::collections::BTreeMap;

fn catalog() -> CatalogSnapshot {
    CatalogSnapshot::new(["F1", "F2", "F3"], BTreeMap::new())
}

#[test]
fn query_model_module_appends_terms_with_empty_connectives() {
    let catalog = catalog();
    let mut query = FilterQuery::new("Test", "Desc");

    assert_eq!(query.add_term("F2", &catalog), Ok(AddOutcome::Added(0)));
    assert_eq!(query.add_term("F2", &catalog), Ok(AddOutcome::Added(1)));

    assert_eq!(query.len(), 2);
    assert_eq!(query.terms()[1], FilterTerm::bare("F2"));
}

#[test]
fn query_model_module_ignores_selector_placeholders() {
    let catalog = catalog();
    let mut query = FilterQuery::default();

    assert_eq!(
        query.add_term(SELECT_FILTER_PLACEHOLDER, &catalog),
        Ok(AddOutcome::Ignored)
    );
    assert_eq!(
        query.add_term(SEPARATOR_PLACEHOLDER, &catalog),
        Ok(AddOutcome::Ignored)
    );
    assert!(query.is_empty());
}

#[test]
fn query_model_module_rejects_unknown_filter_names() {
    let catalog = catalog();
    let mut query = FilterQuery::default();

    let err = query.add_term("F9", &catalog).expect_err("unknown filter");
    assert_eq!(err, QueryEditError::UnknownFilter("F9".to_string()));
    assert_eq!(err.to_string(), "Filter `F9` is not available!");
    assert!(query.is_empty());
}

#[test]
fn query_model_module_updates_a_single_term() {
    let catalog = catalog();
    let mut query = FilterQuery::with_terms(
        "Test",
        "Desc",
        vec![FilterTerm::bare("F1"), FilterTerm::bare("F2")],
    );

    query
        .update_term(1, "AND NOT (", "F3", "", &catalog)
        .expect("update second term");
    assert_eq!(query.terms()[1], FilterTerm::new("AND NOT (", "F3", ""));

    let err = query
        .update_term(5, "", "F1", "", &catalog)
        .expect_err("out of range");
    assert_eq!(err, QueryEditError::IndexOutOfBounds { index: 5, len: 2 });

    let err = query
        .update_term(0, "AND", "F1", "", &catalog)
        .expect_err("binary connective on first term");
    assert!(matches!(err, QueryEditError::InvalidLeadingToken { index: 0, .. }));
}

#[test]
fn query_model_module_replace_terms_is_all_or_nothing() {
    let catalog = catalog();
    let original = vec![FilterTerm::bare("F1"), FilterTerm::bare("F2")];
    let mut query = FilterQuery::with_terms("Test", "Desc", original.clone());

    let err = query
        .replace_terms(
            &[FilterTerm::new("(", "F1", ""), FilterTerm::new("OR", "F2", ")x")],
            &catalog,
        )
        .expect_err("bad trailing token");
    assert!(matches!(err, QueryEditError::InvalidTrailingToken { index: 1, .. }));
    assert_eq!(query.terms(), original.as_slice());

    let err = query
        .replace_terms(&[FilterTerm::bare("F1")], &catalog)
        .expect_err("count mismatch");
    assert_eq!(
        err,
        QueryEditError::TermCountMismatch {
            expected: 2,
            received: 1
        }
    );

    query
        .replace_terms(
            &[FilterTerm::new("(", "F1", ""), FilterTerm::new("OR", "F2", ")")],
            &catalog,
        )
        .expect("apply edits");
    assert_eq!(query.terms()[1].trailing_token, ")");
    assert_eq!(query.open_depth_at(1), 1);
}

#[test]
fn query_model_module_remove_all_keeps_name_and_description() {
    let catalog = catalog();
    let mut query = FilterQuery::new("Test", "Desc");
    query.add_term("F1", &catalog).expect("add");

    query.remove_all();

    assert!(query.is_empty());
    assert!(query.has_name_and_description());
    assert!(!FilterQuery::new("Test", "").has_name_and_description());
}
