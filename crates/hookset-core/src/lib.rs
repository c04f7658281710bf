//! # hookset-core
//!
//! Core types, configuration resolution, and error handling for hookset.

pub mod config;
pub mod error;
pub mod traits;
