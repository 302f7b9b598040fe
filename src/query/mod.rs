pub mod grouping;
pub mod model;
pub mod serialize;
pub mod validate;

pub use grouping::{
    close_markers, first_unmatched_close, is_valid_leading_token, is_valid_trailing_token,
    leading_token_options, open_depth_at, open_markers, trailing_token_options, CLOSE_MARKER,
    FIRST_TERM_LEADING_TOKENS, LEADING_TOKENS, OPEN_MARKER,
};
pub use model::{AddOutcome, FilterQuery, FilterTerm, QueryEditError};
pub use serialize::{serialize, serialize_terms};
pub use validate::{validate, validate_with, ValidationError, ValidationRules};
