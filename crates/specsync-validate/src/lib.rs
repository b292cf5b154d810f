//! # specsync-validate
//!
//! Rule checking for spec records:
//! - `rules::validate` collects every field-rule violation for a candidate
//!   status, in fixed rule order, without short-circuiting
//! - `status::determine_status` resolves the strictest satisfiable
//!   lifecycle status, falling back from `completed` to `draft`
//!
//! Violations are human-readable messages; callers that need machine
//! handling key off the row disposition, not the message text.

pub mod rules;
pub mod status;

pub use rules::{
    MAX_COLUMN_NAME_LEN, MAX_DATABASE_NOTE_LEN, MAX_DEFAULT_VALUE_LEN, MAX_DESCRIPTION_LEN,
    MAX_FORMAT_LEN, MAX_NAME_LEN, MAX_NAME_TRANS_LEN, MAX_NAVIGATION_NOTE_LEN,
    MAX_OTHER_TYPE_LEN, MAX_TABLE_NAME_LEN, MAX_VALIDATION_NOTE_LEN, validate,
};
pub use status::determine_status;
