//! District performance dashboard library
//!
//! This module exposes the data, cache, and metrics layers for use in integration tests.

pub mod cache;
pub mod cli;
pub mod config;
pub mod data;
pub mod metrics;
