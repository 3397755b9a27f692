use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockdesk_core::{DomainError, DomainResult, RecordId};

use crate::resource::{Draft, Resource};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementKind {
    #[serde(rename = "entrada")]
    Inbound,
    #[serde(rename = "salida")]
    Outbound,
}

/// Product as embedded in a movement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRef {
    pub id: RecordId,

    #[serde(rename = "nombre")]
    pub name: String,
}

/// One entry of the stock movement log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockMovement {
    pub id: RecordId,

    #[serde(rename = "producto")]
    pub product: ProductRef,

    #[serde(rename = "tipo_movimiento")]
    pub kind: MovementKind,

    #[serde(rename = "cantidad")]
    pub quantity: i64,

    #[serde(rename = "fecha")]
    pub date: DateTime<Utc>,

    #[serde(rename = "referencia", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl StockMovement {
    /// Quantity with its direction applied (outbound is negative).
    pub fn signed_quantity(&self) -> i64 {
        match self.kind {
            MovementKind::Inbound => self.quantity,
            MovementKind::Outbound => -self.quantity,
        }
    }
}

impl Resource for StockMovement {
    const NAME: &'static str = "stock movement";
    const PATH: &'static str = "/api/movimientos-stock/";
    type Draft = MovementDraft;

    fn id(&self) -> RecordId {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementDraft {
    #[serde(rename = "producto")]
    pub product: RecordId,

    #[serde(rename = "tipo_movimiento")]
    pub kind: MovementKind,

    #[serde(rename = "cantidad")]
    pub quantity: i64,

    #[serde(rename = "referencia", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl Draft for MovementDraft {
    fn validate(&self) -> DomainResult<()> {
        if self.quantity <= 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_nested_product() {
        let movement: StockMovement = serde_json::from_str(
            r#"{"id":1,"producto":{"id":4,"nombre":"Silla de oficina"},
                "tipo_movimiento":"salida","cantidad":10,"fecha":"2024-03-13T10:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(movement.product.name, "Silla de oficina");
        assert_eq!(movement.kind, MovementKind::Outbound);
        assert_eq!(movement.signed_quantity(), -10);
        assert_eq!(movement.reference, None);
    }

    #[test]
    fn draft_requires_positive_quantity() {
        let mut draft = MovementDraft {
            product: RecordId::new(4),
            kind: MovementKind::Inbound,
            quantity: 10,
            reference: Some("PO-001".to_string()),
        };
        assert!(draft.validate().is_ok());
        assert_eq!(serde_json::to_value(&draft).unwrap()["producto"], 4);

        draft.quantity = 0;
        assert!(draft.validate().is_err());
    }
}
