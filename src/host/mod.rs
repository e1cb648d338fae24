//! Hosting adapters.
//!
//! Each adapter is a thin shell around [`crate::interaction::submit_bug::handle`]:
//! - `server`: a standalone axum HTTP server
//! - `function`: a serverless function event handler

pub mod function;
pub mod server;
