use flowfilter::query::{
    first_unmatched_close, is_valid_leading_token, is_valid_trailing_token, leading_token_options,
    open_depth_at, trailing_token_options, FilterTerm,
};

fn term(leading: &str, trailing: &str) -> FilterTerm {
    FilterTerm::new(leading, "F", trailing)
}

#[test]
fn query_grouping_module_offers_connectives_by_position() {
    assert_eq!(leading_token_options(0), &["", "NOT", "(", "( NOT"]);
    assert_eq!(
        leading_token_options(3),
        &["", "AND", "AND NOT", "AND (", "AND NOT (", "OR", "OR NOT", "OR (", "OR NOT ("]
    );

    assert!(is_valid_leading_token(0, "( NOT"));
    assert!(!is_valid_leading_token(0, "AND"));
    assert!(is_valid_leading_token(1, "OR NOT ("));
    assert!(!is_valid_leading_token(1, "( NOT"));
}

#[test]
fn query_grouping_module_depth_counts_own_opening_and_prior_closes() {
    let terms = vec![term("(", ""), term("AND (", ")"), term("OR", ")")];

    assert_eq!(open_depth_at(&terms, 0), 1);
    assert_eq!(open_depth_at(&terms, 1), 2);
    assert_eq!(open_depth_at(&terms, 2), 1);
    assert_eq!(open_depth_at(&terms, 7), 0);
}

#[test]
fn query_grouping_module_depth_never_goes_negative() {
    let terms = vec![term("", ")))"), term("AND", "")];
    assert_eq!(open_depth_at(&terms, 1), 0);
}

#[test]
fn query_grouping_module_trailing_options_grow_with_depth() {
    assert!(trailing_token_options(0).is_empty());
    assert_eq!(trailing_token_options(1), vec!["", ")"]);
    assert_eq!(trailing_token_options(3), vec!["", ")", "))", ")))"]);

    assert!(is_valid_trailing_token(""));
    assert!(is_valid_trailing_token("))"));
    assert!(!is_valid_trailing_token(")("));
}

#[test]
fn query_grouping_module_finds_close_before_open() {
    let balanced = vec![term("(", ""), term("AND", ")")];
    assert_eq!(first_unmatched_close(&balanced), None);

    let premature = vec![term("", ")"), term("AND (", "")];
    assert_eq!(first_unmatched_close(&premature), Some(0));
}
