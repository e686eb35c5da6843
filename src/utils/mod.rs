//! Utility functions shared across layers.
//!
//! - [`validation`] - URL and short code validation, random code generation
//! - [`db_error`] - Database error classification

pub mod db_error;
pub mod validation;
