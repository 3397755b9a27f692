use serde::{Deserialize, Serialize};

use stockdesk_core::{DomainResult, RecordId};

use crate::resource::{require_text, Draft, Resource};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: RecordId,

    #[serde(rename = "nombre")]
    pub name: String,

    /// Only filled in when the list was requested with counts.
    #[serde(rename = "cantidad_productos", default, skip_serializing_if = "Option::is_none")]
    pub product_count: Option<u64>,
}

impl Category {
    /// Query that asks the backend to include `cantidad_productos`.
    pub const WITH_COUNTS: [(&'static str, &'static str); 1] = [("enviar_cantidades", "true")];
}

impl Resource for Category {
    const NAME: &'static str = "category";
    const PATH: &'static str = "/api/category/";
    type Draft = CategoryDraft;

    fn id(&self) -> RecordId {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDraft {
    #[serde(rename = "nombre")]
    pub name: String,
}

impl CategoryDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Draft for CategoryDraft {
    fn validate(&self) -> DomainResult<()> {
        require_text("name", &self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_is_optional() {
        let plain: Category = serde_json::from_str(r#"{"id":1,"nombre":"Vasos"}"#).unwrap();
        assert_eq!(plain.product_count, None);

        let counted: Category =
            serde_json::from_str(r#"{"id":2,"nombre":"MDF","cantidad_productos":5}"#).unwrap();
        assert_eq!(counted.product_count, Some(5));
    }

    #[test]
    fn blank_name_is_rejected() {
        assert!(CategoryDraft::new("Bolsas").validate().is_ok());
        assert!(CategoryDraft::new("").validate().is_err());
        assert!(CategoryDraft::new(" \t").validate().is_err());
    }
}
