//! Shared helpers for integration tests.

pub mod recording_runner;
