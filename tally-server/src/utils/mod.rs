//! Utility module - shared error types and logging
//!
//! # Contents
//!
//! - [`AppError`] - application error type for the HTTP surface
//! - [`AppResult`] - handler result alias
//! - logging setup

pub mod error;
pub mod logger;

pub use error::{AppError, AppResult, ErrorBody};
