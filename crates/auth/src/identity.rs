use serde::{Deserialize, Serialize};

use crate::{Role, TokenClaims};

/// Who the current session belongs to, as read from the access token.
///
/// Advisory and UI-only: it is derived from an unverified token payload, so
/// anything that matters is re-checked by the backend on every request.
/// Never persisted; always re-derivable from the stored access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub display_name: String,
    pub email: String,
    pub role: Role,
}

impl Identity {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl From<TokenClaims> for Identity {
    fn from(claims: TokenClaims) -> Self {
        Self {
            id: claims.user_id,
            display_name: claims.username,
            email: claims.email,
            role: claims.role,
        }
    }
}
