//! Request handling for bug-reporter.
//!
//! This module provides the submission flow that every hosting adapter calls:
//! - Method dispatch and CORS preflight
//! - Validation and rendering of incoming reports
//! - Mapping tracker outcomes to normalized replies

pub mod submit_bug;
