//! `stockdesk-core`: shared building blocks.
//!
//! This crate contains **pure** primitives used by every other crate (no IO).

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use id::RecordId;
