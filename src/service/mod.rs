//! Service integrations for external APIs and clients.
//!
//! This module contains the issue tracker integration used by the bug-reporter.
//! The tracker is defined as a generic trait plus a concrete GitHub
//! implementation, allowing for extensibility and easy testing.

pub mod tracker;
