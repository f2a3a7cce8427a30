//! Run Configuration Module
//!
//! Resolves the per-invocation configuration from command-line flags and
//! defaults. The configuration is built once, confirmed by the operator,
//! and consumed read-only by the rest of the run.
//!
//! # Components
//!
//! - [`resolver`]: flag parsing and default backfilling

pub mod resolver;

pub use resolver::{resolve_arguments, Resolution, RunConfig, DEFAULT_ENV_NAME};
