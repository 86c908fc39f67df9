//! Integration test utilities for the care server
//!
//! This crate provides helpers for running end-to-end tests against
//! the REST API and the payment webhook.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
