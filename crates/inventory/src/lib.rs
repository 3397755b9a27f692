//! Inventory console schemas.
//!
//! This crate pins the backend's resource schemas (wire names, paths, form
//! validation) and the dashboard summaries computed over them. Pure logic:
//! no IO, no HTTP, no storage.

pub mod category;
pub mod dashboard;
pub mod movement;
pub mod product;
pub mod resource;
pub mod supplier;

pub use category::{Category, CategoryDraft};
pub use dashboard::{filter_products, recent_movements, Summary};
pub use movement::{MovementDraft, MovementKind, ProductRef, StockMovement};
pub use product::{Product, ProductDraft, StockStatus};
pub use resource::{Draft, Resource};
pub use supplier::{Supplier, SupplierDraft, SupplierStatus};
