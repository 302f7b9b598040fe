use super::model::FilterTerm;

pub const OPEN_MARKER: char = '(';
pub const CLOSE_MARKER: char = ')';

/// Connectives offered for the first term. There is no preceding term, so plain
/// `AND`/`OR` never appear here.
pub const FIRST_TERM_LEADING_TOKENS: [&str; 4] = ["", "NOT", "(", "( NOT"];

/// Connectives offered for every term after the first.
pub const LEADING_TOKENS: [&str; 9] = [
    "",
    "AND",
    "AND NOT",
    "AND (",
    "AND NOT (",
    "OR",
    "OR NOT",
    "OR (",
    "OR NOT (",
];

pub fn leading_token_options(index: usize) -> &'static [&'static str] {
    if index == 0 {
        &FIRST_TERM_LEADING_TOKENS
    } else {
        &LEADING_TOKENS
    }
}

pub fn is_valid_leading_token(index: usize, token: &str) -> bool {
    leading_token_options(index).contains(&token)
}

pub fn is_valid_trailing_token(token: &str) -> bool {
    token.chars().all(|ch| ch == CLOSE_MARKER)
}

pub fn open_markers(token: &str) -> usize {
    token.chars().filter(|ch| *ch == OPEN_MARKER).count()
}

pub fn close_markers(token: &str) -> usize {
    token.chars().filter(|ch| *ch == CLOSE_MARKER).count()
}

/// Number of groups still open when the trailing control of `terms[index]` is
/// rendered: opens up to and including the term's own leading token, minus the
/// closes of every prior term. Never negative.
pub fn open_depth_at(terms: &[FilterTerm], index: usize) -> usize {
    if index >= terms.len() {
        return 0;
    }
    let opens: usize = terms[..=index]
        .iter()
        .map(|term| open_markers(&term.leading_token))
        .sum();
    let closes: usize = terms[..index]
        .iter()
        .map(|term| close_markers(&term.trailing_token))
        .sum();
    opens.saturating_sub(closes)
}

/// Closing choices for a term at `depth`: the empty choice followed by one
/// option per depth level. Empty when no group is open, in which case no
/// trailing control is rendered at all.
pub fn trailing_token_options(depth: usize) -> Vec<String> {
    if depth == 0 {
        return Vec::new();
    }
    let mut options = Vec::with_capacity(depth + 1);
    options.push(String::new());
    for level in 1..=depth {
        options.push(CLOSE_MARKER.to_string().repeat(level));
    }
    options
}

/// Index of the first term whose trailing token closes more groups than are
/// open at that point, if any.
pub fn first_unmatched_close(terms: &[FilterTerm]) -> Option<usize> {
    let mut depth = 0usize;
    for (index, term) in terms.iter().enumerate() {
        depth += open_markers(&term.leading_token);
        let closes = close_markers(&term.trailing_token);
        if closes > depth {
            return Some(index);
        }
        depth -= closes;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn term(leading: &str, trailing: &str) -> FilterTerm {
        FilterTerm::new(leading, "F", trailing)
    }

    #[test]
    fn first_term_never_offers_plain_connectives() {
        let first = leading_token_options(0);
        assert!(!first.contains(&"AND"));
        assert!(!first.contains(&"OR"));
        assert!(leading_token_options(3).contains(&"OR NOT ("));
    }

    #[test]
    fn depth_counts_own_leading_group() {
        let terms = vec![term("(", ""), term("AND", ")")];
        assert_eq!(open_depth_at(&terms, 0), 1);
        assert_eq!(open_depth_at(&terms, 1), 1);
        assert_eq!(open_depth_at(&terms, 2), 0);
    }

    #[test]
    fn depth_saturates_at_zero() {
        let terms = vec![term("", "))"), term("AND", "")];
        assert_eq!(open_depth_at(&terms, 1), 0);
    }

    #[test]
    fn trailing_options_offer_one_choice_per_level() {
        assert!(trailing_token_options(0).is_empty());
        assert_eq!(trailing_token_options(3), vec!["", ")", "))", ")))"]);
    }

    #[test]
    fn unmatched_close_is_located() {
        let terms = vec![term("", ")"), term("AND (", "")];
        assert_eq!(first_unmatched_close(&terms), Some(0));
        let nested = vec![term("(", ""), term("AND (", "))")];
        assert_eq!(first_unmatched_close(&nested), None);
    }
}
