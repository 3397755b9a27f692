//! The one abstraction behind every list + form screen.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use stockdesk_core::{DomainError, DomainResult, RecordId};

/// A backend collection with list/get/create/update/delete endpoints.
///
/// `PATH` is the collection URL path with a trailing slash; items live at
/// `{PATH}{id}/`.
pub trait Resource: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Singular, human-readable name (used in logs and errors).
    const NAME: &'static str;

    const PATH: &'static str;

    /// Form payload sent on create and update.
    type Draft: Draft;

    fn id(&self) -> RecordId;

    fn item_path(id: RecordId) -> String {
        format!("{}{}/", Self::PATH, id)
    }
}

/// A form payload that can be checked before it leaves the client.
pub trait Draft: Serialize + Send + Sync {
    fn validate(&self) -> DomainResult<()>;
}

pub(crate) fn require_text(field: &str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Decimal fields arrive as JSON numbers or as strings (`"199.99"`) depending
/// on the backend serializer.
pub(crate) fn decimal<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse::<f64>().map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Category, StockMovement, Supplier};

    #[derive(Debug, Deserialize)]
    struct Priced {
        #[serde(deserialize_with = "decimal")]
        price: f64,
    }

    #[test]
    fn item_paths_nest_under_the_collection() {
        let id = RecordId::new(12);
        assert_eq!(Category::item_path(id), "/api/category/12/");
        assert_eq!(Supplier::item_path(id), "/api/supplier/12/");
        assert_eq!(StockMovement::item_path(id), "/api/movimientos-stock/12/");
    }

    #[test]
    fn decimal_accepts_numbers_and_strings() {
        let n: Priced = serde_json::from_str(r#"{"price": 12.5}"#).unwrap();
        let s: Priced = serde_json::from_str(r#"{"price": " 199.99 "}"#).unwrap();
        assert_eq!(n.price, 12.5);
        assert_eq!(s.price, 199.99);
        assert!(serde_json::from_str::<Priced>(r#"{"price": "abc"}"#).is_err());
    }

    #[test]
    fn require_text_rejects_blank() {
        assert!(require_text("name", "Vasos").is_ok());
        assert!(require_text("name", " \t").is_err());
    }
}
