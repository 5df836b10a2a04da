//! Tern Outcome - the result contract shared by every runtime operation.
//!
//! This crate provides:
//! - `Outcome<T>`: `Success`, `Empty` (no opinion / nothing found) or `Failure`
//! - `Failure`: a coded error carrying an optional cause chain
//! - `ErrorCode`: the numeric error taxonomy (`T####`)
//! - Factory functions for every failure the runtime raises (`errors`)
//!
//! # Why three states
//!
//! Restrictions, lookups and overload candidates all need to say "I have no
//! opinion" without blocking their neighbours. `Empty` carries that meaning,
//! so composition stays a fold over `switch_if_empty` and a single rejection
//! stays terminal.

mod error_code;
pub mod errors;
mod failure;
mod outcome;

pub use error_code::{ErrorCategory, ErrorCode};
pub use failure::{Chain, Failure};
pub use outcome::Outcome;
