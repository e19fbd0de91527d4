//! Import macOS Screen Time app usage into ActivityWatch.
//!
//! This crate provides the core functionality for the `aw-import-screentime`
//! CLI tool.
//!
//! # Architecture
//!
//! - [`config`] - Database location and ActivityWatch client settings
//! - [`storage`] - Read-only queries against knowledgeC.db
//! - [`model`] - Devices, raw usage rows, normalized events
//! - [`activitywatch`] - Buckets, REST client, publisher
//! - [`import`] - Per-device orchestration
//! - [`cli`] - Command-line interface using clap
//! - [`error`] - Error types and handling

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod activitywatch;
pub mod cli;
pub mod config;
pub mod error;
pub mod import;
pub mod model;
pub mod storage;

pub use error::{Error, Result};
