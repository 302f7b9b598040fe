use super::grouping::{is_valid_leading_token, is_valid_trailing_token, open_depth_at};
use crate::catalog::{is_placeholder, CatalogSnapshot};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterTerm {
    #[serde(default)]
    pub leading_token: String,
    pub filter_name: String,
    #[serde(default)]
    pub trailing_token: String,
}

impl FilterTerm {
    pub fn new(leading_token: &str, filter_name: &str, trailing_token: &str) -> Self {
        Self {
            leading_token: leading_token.to_string(),
            filter_name: filter_name.to_string(),
            trailing_token: trailing_token.to_string(),
        }
    }

    pub fn bare(filter_name: &str) -> Self {
        Self::new("", filter_name, "")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryEditError {
    #[error("Filter `{0}` is not available!")]
    UnknownFilter(String),
    #[error("filter index {index} is out of range for {len} filters")]
    IndexOutOfBounds { index: usize, len: usize },
    #[error("operator `{token}` is not allowed for filter {index}")]
    InvalidLeadingToken { index: usize, token: String },
    #[error("closing `{token}` for filter {index} may only contain `)`")]
    InvalidTrailingToken { index: usize, token: String },
    #[error("expected {expected} filters but received {received}")]
    TermCountMismatch { expected: usize, received: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added(usize),
    Ignored,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterQuery {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    terms: Vec<FilterTerm>,
}

impl FilterQuery {
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            terms: Vec::new(),
        }
    }

    /// Builds a query from stored terms without catalog checks.
    pub fn with_terms(name: &str, description: &str, terms: Vec<FilterTerm>) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            terms,
        }
    }

    pub fn terms(&self) -> &[FilterTerm] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn has_name_and_description(&self) -> bool {
        !self.name.is_empty() && !self.description.is_empty()
    }

    pub fn open_depth_at(&self, index: usize) -> usize {
        open_depth_at(&self.terms, index)
    }

    /// Appends `filter_name` with empty connectives. Selector placeholders are a
    /// no-op rather than an error.
    pub fn add_term(
        &mut self,
        filter_name: &str,
        catalog: &CatalogSnapshot,
    ) -> Result<AddOutcome, QueryEditError> {
        if is_placeholder(filter_name) {
            return Ok(AddOutcome::Ignored);
        }
        if !catalog.contains_filter(filter_name) {
            return Err(QueryEditError::UnknownFilter(filter_name.to_string()));
        }
        self.terms.push(FilterTerm::bare(filter_name));
        Ok(AddOutcome::Added(self.terms.len() - 1))
    }

    pub fn update_term(
        &mut self,
        index: usize,
        leading_token: &str,
        filter_name: &str,
        trailing_token: &str,
        catalog: &CatalogSnapshot,
    ) -> Result<(), QueryEditError> {
        let len = self.terms.len();
        let term = self
            .terms
            .get_mut(index)
            .ok_or(QueryEditError::IndexOutOfBounds { index, len })?;
        check_term(index, leading_token, filter_name, trailing_token, catalog)?;
        *term = FilterTerm::new(leading_token, filter_name, trailing_token);
        Ok(())
    }

    /// Round-trips an echoed term list through `update_term` for every index.
    /// Either every term is applied or none is.
    pub fn replace_terms(
        &mut self,
        edited: &[FilterTerm],
        catalog: &CatalogSnapshot,
    ) -> Result<(), QueryEditError> {
        if edited.len() != self.terms.len() {
            return Err(QueryEditError::TermCountMismatch {
                expected: self.terms.len(),
                received: edited.len(),
            });
        }
        let mut staged = self.terms.clone();
        for (index, term) in edited.iter().enumerate() {
            check_term(
                index,
                &term.leading_token,
                &term.filter_name,
                &term.trailing_token,
                catalog,
            )?;
            staged[index] = term.clone();
        }
        self.terms = staged;
        Ok(())
    }

    pub fn remove_all(&mut self) {
        self.terms.clear();
    }
}

fn check_term(
    index: usize,
    leading_token: &str,
    filter_name: &str,
    trailing_token: &str,
    catalog: &CatalogSnapshot,
) -> Result<(), QueryEditError> {
    if !is_valid_leading_token(index, leading_token) {
        return Err(QueryEditError::InvalidLeadingToken {
            index,
            token: leading_token.to_string(),
        });
    }
    if !is_valid_trailing_token(trailing_token) {
        return Err(QueryEditError::InvalidTrailingToken {
            index,
            token: trailing_token.to_string(),
        });
    }
    if !catalog.contains_filter(filter_name) {
        return Err(QueryEditError::UnknownFilter(filter_name.to_string()));
    }
    Ok(())
}
