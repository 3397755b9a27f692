//! `stockdesk-auth`: session identity primitives and route gating.
//!
//! This crate is intentionally decoupled from HTTP and storage: it knows how a
//! credential looks, how to read the identity claims out of an access token and
//! which chrome a view gets, nothing more.

pub mod claims;
pub mod credential;
pub mod decode;
pub mod guard;
pub mod identity;
pub mod roles;

pub use claims::TokenClaims;
pub use credential::Credential;
pub use decode::{decode, decode_claims, DecodeError};
pub use guard::{layout, Layout, NavItem, View, SIDEBAR};
pub use identity::Identity;
pub use roles::Role;
