//! Text sanitation and suffix-keeping truncation.

mod sanitizer;

pub use sanitizer::{
    clean_paragraph, sanitize, sanitize_required, tail_chars, validate_user_id, InputLimits,
};
