//! Purpose: JSON encode/decode boundary shared by the container and the bench harness.
//! Exports: `from_str`, `from_slice`, `to_vec`, parse-failure categorization helpers.
//! Role: Single seam for the serde_json calls so callsites avoid ad hoc decode logic.
//! Invariants: Errors are returned as the underlying `serde_json::Error`, never logged.
//! Invariants: Helper APIs stay small and deterministic (no hidden global state).

mod parse;

pub use parse::{
    ParseFailureCategory, categorize_error, categorize_message, from_slice, from_str,
    hint_for_error, to_vec,
};
