//! # boxoffice-core
//!
//! Core crate for BoxOffice. Contains configuration schemas, the unified
//! error system, and the shared result alias.
//!
//! This crate has **no** internal dependencies on other BoxOffice crates.

pub mod config;
pub mod error;
pub mod result;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
