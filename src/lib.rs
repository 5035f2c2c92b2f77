//! Purpose: `Optional<T>` for serde, telling a present JSON field apart from a null or missing one.
//! Exports: `Optional` (core), `json` (decode seam), `error` (callsite errors), `bench` (comparison harness).
//! Role: Library crate root; the `optional-bench` demo drives `bench` from the command line.
//! Invariants: Only two field states are tracked: present-with-value and absent.
//! Invariants: The core never logs and never wraps decode errors.
pub mod bench;
pub mod error;
pub mod json;
pub mod optional;

pub use optional::Optional;
