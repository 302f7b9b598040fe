use super::grouping::OPEN_MARKER;
use super::model::{FilterQuery, FilterTerm};

/// Renders the query as a single-line boolean expression. Callers validate
/// first; nothing is checked here.
pub fn serialize(query: &FilterQuery) -> String {
    serialize_terms(query.terms())
}

pub fn serialize_terms(terms: &[FilterTerm]) -> String {
    let mut expression = String::new();
    for term in terms {
        if !term.leading_token.is_empty() {
            expression.push_str(&term.leading_token);
            if !term.leading_token.ends_with(OPEN_MARKER) {
                expression.push(' ');
            }
        }
        expression.push_str(&term.filter_name);
        expression.push_str(&term.trailing_token);
        expression.push(' ');
    }
    expression
}
