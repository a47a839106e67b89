//! Core domain + application logic for the Focalboard Telegram bridge.
//!
//! This crate is intentionally framework-agnostic. Telegram / the Focalboard
//! verification API / the HTTP listener live behind ports (traits)
//! implemented in adapter crates.

pub mod commands;
pub mod config;
pub mod dispatch;
pub mod domain;
pub mod errors;
pub mod logging;
pub mod ports;

pub use errors::{Error, Result};
