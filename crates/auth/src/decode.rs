//! Access token payload decoding.
//!
//! The payload segment of a JWT is read **without** signature verification.
//! The token arrives from our own backend over TLS and the result only drives
//! the UI; this is a trust boundary, not a security control.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use thiserror::Error;

use crate::{Identity, TokenClaims};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("malformed token: {0}")]
    Malformed(&'static str),

    #[error("payload is not valid base64url: {0}")]
    Base64(String),

    #[error("payload is not a valid claims object: {0}")]
    Json(String),
}

/// Decode the identity carried by an access token.
pub fn decode(token: &str) -> Result<Identity, DecodeError> {
    decode_claims(token).map(Identity::from)
}

/// Decode the raw claims carried by an access token.
pub fn decode_claims(token: &str) -> Result<TokenClaims, DecodeError> {
    let mut segments = token.trim().split('.');
    let (Some(_header), Some(payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(DecodeError::Malformed("expected three dot-separated segments"));
    };

    if payload.is_empty() {
        return Err(DecodeError::Malformed("empty payload segment"));
    }

    // Some encoders pad the segment; base64url in JWTs is normally unpadded.
    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| DecodeError::Base64(e.to_string()))?;

    serde_json::from_slice(&bytes).map_err(|e| DecodeError::Json(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Role;
    use base64::engine::general_purpose::{STANDARD, URL_SAFE};
    use proptest::prelude::*;

    fn token_with_payload(payload: &str) -> String {
        format!(
            "{}.{}.sig",
            URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#),
            URL_SAFE_NO_PAD.encode(payload)
        )
    }

    const ALICE: &str =
        r#"{"user_id":1,"username":"alice","email":"alice@example.com","role":"admin"}"#;

    #[test]
    fn decodes_identity_from_payload() {
        let identity = decode(&token_with_payload(ALICE)).unwrap();
        assert_eq!(identity.id, "1");
        assert_eq!(identity.display_name, "alice");
        assert_eq!(identity.email, "alice@example.com");
        assert_eq!(identity.role, Role::Admin);
        assert!(identity.is_admin());
    }

    #[test]
    fn accepts_padded_payload_segment() {
        let token = format!("h.{}.s", URL_SAFE.encode(ALICE));
        assert_eq!(decode(&token).unwrap().display_name, "alice");
    }

    #[test]
    fn rejects_wrong_segment_count() {
        assert!(matches!(decode(""), Err(DecodeError::Malformed(_))));
        assert!(matches!(decode("abc"), Err(DecodeError::Malformed(_))));
        assert!(matches!(decode("a.b"), Err(DecodeError::Malformed(_))));
        assert!(matches!(decode("a.b.c.d"), Err(DecodeError::Malformed(_))));
        assert!(matches!(decode("a..c"), Err(DecodeError::Malformed(_))));
    }

    #[test]
    fn rejects_standard_base64_alphabet() {
        // '+' and '/' only appear in the standard alphabet.
        let payload = STANDARD.encode([0xfbu8, 0xff, 0xfe]);
        assert!(payload.contains('+') || payload.contains('/'));
        let token = format!("h.{payload}.s");
        assert!(matches!(decode(&token), Err(DecodeError::Base64(_))));
    }

    #[test]
    fn rejects_non_json_and_incomplete_claims() {
        assert!(matches!(
            decode(&token_with_payload("not json")),
            Err(DecodeError::Json(_))
        ));
        assert!(matches!(
            decode(&token_with_payload(r#"{"user_id":1,"username":"alice"}"#)),
            Err(DecodeError::Json(_))
        ));
        assert!(matches!(
            decode(&token_with_payload("[1,2,3]")),
            Err(DecodeError::Json(_))
        ));
    }

    proptest! {
        #[test]
        fn never_panics_on_arbitrary_input(token in ".*") {
            let _ = decode(&token);
        }

        #[test]
        fn payload_outside_base64url_alphabet_fails(
            prefix in "[A-Za-z0-9_-]{0,16}",
            bad in "[^A-Za-z0-9_=.-]",
            suffix in "[A-Za-z0-9_-]{0,16}",
        ) {
            let token = format!("h.{prefix}{bad}{suffix}.s");
            prop_assert!(decode(&token).is_err());
        }

        #[test]
        fn payload_that_is_not_a_claims_object_fails(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
            prop_assume!(serde_json::from_slice::<TokenClaims>(&bytes).is_err());
            let token = format!("h.{}.s", URL_SAFE_NO_PAD.encode(&bytes));
            prop_assert!(decode(&token).is_err());
        }
    }
}
