//! Utility module - common helpers and types
//!
//! - [`AppError`] / [`AppResult`] - application error type and result alias
//! - [`ApiResponse`] - API response envelope
//! - logging and validation helpers

pub mod error;
pub mod logger;
pub mod result;
pub mod validation;

pub use error::{ApiResponse, AppError};
pub use error::{ok, ok_message, ok_with_message};
pub use result::AppResult;
