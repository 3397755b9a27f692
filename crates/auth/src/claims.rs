use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::Role;

/// Claims carried in the access token payload.
///
/// This is the shape the backend puts in its tokens; it is consumed, never
/// produced, by this client. Unknown claims are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Backend user id. Issued as a number by some backends and a string by
    /// others; normalized to a string here.
    #[serde(deserialize_with = "string_or_number")]
    pub user_id: String,

    pub username: String,

    pub email: String,

    pub role: Role,

    /// Expiry (seconds since the Unix epoch), when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Issued-at (seconds since the Unix epoch), when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

impl TokenClaims {
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|secs| DateTime::from_timestamp(secs, 0))
    }

    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        self.iat.and_then(|secs| DateTime::from_timestamp(secs, 0))
    }

    /// Informational only: the client never drops a session on its own
    /// reading of `exp`, the backend's 401 is authoritative.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at().is_some_and(|exp| now >= exp)
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Uint(u64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::Uint(n) => n.to_string(),
    })
}
