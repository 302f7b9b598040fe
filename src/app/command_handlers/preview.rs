use crate::query::{
    is_valid_leading_token, is_valid_trailing_token, serialize, validate_with, FilterQuery,
    ValidationRules,
};
use std::fs;

pub fn cmd_preview(args: &[String]) -> Result<String, String> {
    let mut path = None;
    let mut rules = ValidationRules::default();
    for arg in args {
        match arg.as_str() {
            "--strict-nesting" => rules.strict_nesting = true,
            flag if flag.starts_with("--") => return Err(format!("unknown flag `{flag}`")),
            value if path.is_none() => path = Some(value.to_string()),
            value => return Err(format!("unexpected argument `{value}`")),
        }
    }
    let path = path.ok_or_else(|| "usage: flowfilter preview <query.yaml>".to_string())?;

    let raw = fs::read_to_string(&path).map_err(|e| format!("failed to read {path}: {e}"))?;
    let query: FilterQuery =
        serde_yaml::from_str(&raw).map_err(|e| format!("invalid query yaml in {path}: {e}"))?;

    for (index, term) in query.terms().iter().enumerate() {
        if !is_valid_leading_token(index, &term.leading_token) {
            return Err(format!(
                "operator `{}` is not allowed for filter {}",
                term.leading_token,
                index + 1
            ));
        }
        if !is_valid_trailing_token(&term.trailing_token) {
            return Err(format!(
                "closing `{}` for filter {} may only contain `)`",
                term.trailing_token,
                index + 1
            ));
        }
    }

    validate_with(&query, rules).map_err(|err| format!("{}: {err}", err.code()))?;
    Ok(serialize(&query).trim_end().to_string())
}
