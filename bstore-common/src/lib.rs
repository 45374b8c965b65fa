//! # Beatstore Common Library
//!
//! Shared code for the beatstore marketplace service including:
//! - Database initialization and shared models
//! - Error types
//! - Configuration loading and root folder resolution

pub mod config;
pub mod db;
pub mod error;

pub use error::{Error, Result};
