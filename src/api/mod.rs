//! Wire contracts of the remote short-code service.
//!
//! # Modules
//!
//! - [`dto`] - Request and response bodies of `/shorten`, `/stats/{code}`,
//!   `/{code}` and `/health`

pub mod dto;
