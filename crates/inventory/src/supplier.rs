use serde::{Deserialize, Serialize};

use stockdesk_core::{DomainError, DomainResult, RecordId};

use crate::resource::{require_text, Draft, Resource};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SupplierStatus {
    #[default]
    #[serde(rename = "activo")]
    Active,
    #[serde(rename = "inactivo")]
    Inactive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: RecordId,

    #[serde(rename = "nombre")]
    pub name: String,

    #[serde(rename = "contacto", default)]
    pub contact: String,

    #[serde(default)]
    pub email: String,

    #[serde(rename = "telefono", default)]
    pub phone: String,

    #[serde(rename = "estado", default)]
    pub status: SupplierStatus,
}

impl Resource for Supplier {
    const NAME: &'static str = "supplier";
    const PATH: &'static str = "/api/supplier/";
    type Draft = SupplierDraft;

    fn id(&self) -> RecordId {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierDraft {
    #[serde(rename = "nombre")]
    pub name: String,

    #[serde(rename = "contacto")]
    pub contact: String,

    pub email: String,

    #[serde(rename = "telefono")]
    pub phone: String,

    #[serde(rename = "estado")]
    pub status: SupplierStatus,
}

impl Draft for SupplierDraft {
    fn validate(&self) -> DomainResult<()> {
        require_text("name", &self.name)?;
        let email = self.email.trim();
        if !email.is_empty() && !email.contains('@') {
            return Err(DomainError::validation(format!("invalid email: {email}")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> SupplierDraft {
        SupplierDraft {
            name: "Vasa SRL.".to_string(),
            contact: "Sarah Johnson".to_string(),
            email: "sarah@example.com".to_string(),
            phone: "+1 (555) 234-5678".to_string(),
            status: SupplierStatus::Active,
        }
    }

    #[test]
    fn status_uses_backend_values() {
        let supplier: Supplier = serde_json::from_str(
            r#"{"id":3,"nombre":"Food Solutions.","estado":"inactivo"}"#,
        )
        .unwrap();
        assert_eq!(supplier.status, SupplierStatus::Inactive);
        assert_eq!(supplier.email, "");

        let value = serde_json::to_value(draft()).unwrap();
        assert_eq!(value["estado"], "activo");
        assert_eq!(value["telefono"], "+1 (555) 234-5678");
    }

    #[test]
    fn email_is_checked_only_when_given() {
        assert!(draft().validate().is_ok());

        let mut no_email = draft();
        no_email.email = String::new();
        assert!(no_email.validate().is_ok());

        let mut bad = draft();
        bad.email = "sarah.example.com".to_string();
        assert!(bad.validate().is_err());
    }
}
