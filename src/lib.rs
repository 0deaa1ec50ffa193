//! Notion Dev Logger Library
//!
//! This module exports the core components for testing and integration.

pub mod cli;
pub mod comment;
pub mod config;
pub mod error;
pub mod logging;
pub mod mapper;
pub mod notion;
pub mod recorder;
pub mod session;
pub mod tools;
pub mod types;
