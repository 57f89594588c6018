//! # markban Common Library
//!
//! Shared code for the markban bookmark restructure tooling:
//! - Error types
//! - Restructure configuration (WIP limit, reserved ids, source declarations)
//! - Store open / data models for the places database
//! - Timestamp and external-identifier (guid) utilities

pub mod config;
pub mod db;
pub mod error;
pub mod guid;
pub mod time;

pub use config::RestructureConfig;
pub use error::{Error, Result};
