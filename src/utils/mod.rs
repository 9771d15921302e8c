//! Utility functions for user-input processing.
//!
//! - [`short_code`] - Short-code extraction from raw codes or full URLs

pub mod short_code;
