//! Ranks delivery methodologies against a project's context.
//!
//! The [`recommendation`] module holds the scoring engines; [`config`],
//! [`telemetry`] and [`error`] carry the service plumbing shared with the API
//! binary.

pub mod config;
pub mod error;
pub mod recommendation;
pub mod telemetry;
