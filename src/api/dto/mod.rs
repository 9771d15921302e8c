//! Data Transfer Objects for the remote service's wire format.
//!
//! All DTOs use Serde for JSON serialization/deserialization. Request DTOs
//! also derive `validator::Validate` so malformed input is rejected before
//! it reaches the transport.

pub mod error;
pub mod health;
pub mod shorten;
pub mod stats;
