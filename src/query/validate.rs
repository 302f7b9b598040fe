use super::grouping::{close_markers, first_unmatched_close, open_markers};
use super::model::FilterQuery;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("No filter selected!")]
    NoFilterSelected,
    #[error("Operator not selected for all filters!")]
    MissingOperator,
    #[error("Parenthesis are not correctly closed!")]
    UnbalancedGrouping,
}

impl ValidationError {
    pub fn code(self) -> &'static str {
        match self {
            Self::NoFilterSelected => "no_filter_selected",
            Self::MissingOperator => "missing_operator",
            Self::UnbalancedGrouping => "unbalanced_grouping",
        }
    }
}

/// Optional rules layered on top of the structural checks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ValidationRules {
    /// Also reject a closing marker that appears before its matching open.
    #[serde(default)]
    pub strict_nesting: bool,
}

pub fn validate(query: &FilterQuery) -> Result<(), ValidationError> {
    validate_with(query, ValidationRules::default())
}

pub fn validate_with(query: &FilterQuery, rules: ValidationRules) -> Result<(), ValidationError> {
    let terms = query.terms();
    if terms.is_empty() {
        return Err(ValidationError::NoFilterSelected);
    }

    if terms
        .iter()
        .skip(1)
        .any(|term| term.leading_token.is_empty())
    {
        return Err(ValidationError::MissingOperator);
    }

    let opens: usize = terms
        .iter()
        .map(|term| open_markers(&term.leading_token))
        .sum();
    let closes: usize = terms
        .iter()
        .map(|term| close_markers(&term.trailing_token))
        .sum();
    if opens != closes {
        return Err(ValidationError::UnbalancedGrouping);
    }

    if rules.strict_nesting && first_unmatched_close(terms).is_some() {
        return Err(ValidationError::UnbalancedGrouping);
    }

    Ok(())
}
