//! Core domain + application logic for the Discord Gemini bot.
//!
//! This crate is intentionally framework-agnostic. Discord / Gemini live
//! behind ports (traits) implemented in adapter crates.

pub mod config;
pub mod domain;
pub mod errors;
pub mod handler;
pub mod logging;
pub mod messaging;
pub mod model;
pub mod reply;

pub use errors::{Error, Result};
