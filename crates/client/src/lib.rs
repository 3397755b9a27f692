//! `stockdesk-client`
//!
//! **Responsibility:** the console's connection to the inventory backend.
//!
//! This crate provides:
//! - Session lifecycle (login, logout, rehydration) over a durable token store
//! - A generic CRUD client for products, categories, suppliers and movements
//! - Environment-based configuration
//!
//! The backend stays the authority: the identity decoded here is advisory
//! and every request is authorized server-side.

pub mod backend;
pub mod config;
pub mod navigation;
pub mod resources;
pub mod session;
pub mod state;
pub mod store;

pub use backend::{AuthBackend, BackendError, HttpBackend};
pub use config::{ClientConfig, ConfigError};
pub use navigation::{Navigator, RecordingNavigator};
pub use resources::{ApiError, ResourceClient};
pub use session::{LoginError, SessionManager, SessionState};
pub use state::{AppState, DashboardView};
pub use store::{InMemoryTokenStore, SqliteTokenStore, StoreError, TokenStore};
