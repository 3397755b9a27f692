//! Token pair issued by the backend's token endpoint.

use serde::{Deserialize, Serialize};

/// Access + refresh token pair.
///
/// Wire names follow the token endpoint response (`{"access": .., "refresh": ..}`).
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    #[serde(rename = "access")]
    pub access_token: String,

    #[serde(rename = "refresh")]
    pub refresh_token: String,
}

impl Credential {
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }
}

// Token material must never end up in logs.
impl core::fmt::Debug for Credential {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Credential")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_token_endpoint_response() {
        let cred: Credential =
            serde_json::from_str(r#"{"access":"a.b.c","refresh":"r1"}"#).unwrap();
        assert_eq!(cred, Credential::new("a.b.c", "r1"));
    }

    #[test]
    fn rejects_response_missing_refresh() {
        assert!(serde_json::from_str::<Credential>(r#"{"access":"a.b.c"}"#).is_err());
    }

    #[test]
    fn debug_does_not_leak_tokens() {
        let rendered = format!("{:?}", Credential::new("secret-access", "secret-refresh"));
        assert!(!rendered.contains("secret-access"));
        assert!(!rendered.contains("secret-refresh"));
    }
}
