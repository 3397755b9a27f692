use serde::{Deserialize, Serialize};

use stockdesk_core::{DomainError, DomainResult, RecordId};

use crate::resource::{decimal, require_text, Draft, Resource};

/// Catalog product with its on-hand quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: RecordId,

    #[serde(rename = "nombre")]
    pub name: String,

    #[serde(rename = "descripcion", default)]
    pub description: String,

    #[serde(rename = "precio", deserialize_with = "decimal")]
    pub price: f64,

    #[serde(rename = "cantidad_disponible", default)]
    pub quantity_on_hand: i64,

    /// Category name, when the product has one.
    #[serde(rename = "categoria", default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// SKU.
    #[serde(rename = "codigo", default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StockStatus {
    OutOfStock,
    InStock(i64),
}

impl Product {
    pub fn stock_status(&self) -> StockStatus {
        if self.quantity_on_hand <= 0 {
            StockStatus::OutOfStock
        } else {
            StockStatus::InStock(self.quantity_on_hand)
        }
    }
}

impl Resource for Product {
    const NAME: &'static str = "product";
    const PATH: &'static str = "/api/product/";
    type Draft = ProductDraft;

    fn id(&self) -> RecordId {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    #[serde(rename = "nombre")]
    pub name: String,

    #[serde(rename = "descripcion")]
    pub description: String,

    #[serde(rename = "precio")]
    pub price: f64,

    #[serde(rename = "cantidad_disponible")]
    pub quantity_on_hand: i64,

    /// Category id to attach the product to.
    #[serde(rename = "categoria", skip_serializing_if = "Option::is_none")]
    pub category: Option<RecordId>,

    #[serde(rename = "codigo", skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl Draft for ProductDraft {
    fn validate(&self) -> DomainResult<()> {
        require_text("name", &self.name)?;
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(DomainError::validation("price must be a non-negative amount"));
        }
        if self.quantity_on_hand < 0 {
            return Err(DomainError::validation("quantity cannot be negative"));
        }
        if let Some(code) = &self.code {
            require_text("code", code)?;
        }
        Ok(())
    }
}
