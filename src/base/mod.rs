//! Core components, types, and utilities for the bug-reporter.
//!
//! This module contains fundamental building blocks used throughout the application:
//! - Configuration handling and environment variables.
//! - The issue template and the report-to-issue transformation.
//! - Common types and result handling.

pub mod config;
pub mod template;
pub mod types;
