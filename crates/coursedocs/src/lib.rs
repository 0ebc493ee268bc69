//! Public facade crate for `coursedocs`.
//!
//! This crate intentionally contains no IO or provider-specific logic.
//! It re-exports the backend-agnostic types/traits from `coursedocs-core`.

pub use coursedocs_core::*;
