//! Session Token Signing
//!
//! Session tokens are `<uuid>.<signature>`: the session id in plain text
//! plus an HMAC-SHA256 signature over it, base64url-encoded. The token is
//! opaque to the client; the server verifies the signature before ever
//! touching the session store.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use uuid::Uuid;

use crate::error::{AccountError, AccountResult};

type HmacSha256 = Hmac<Sha256>;

/// Generate a signed session token for a session id.
pub fn sign_session_token(secret: &[u8; 32], session_id: Uuid) -> String {
    let session_id = session_id.to_string();

    let mut mac =
        HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(session_id.as_bytes());
    let signature = mac.finalize().into_bytes();

    format!("{}.{}", session_id, URL_SAFE_NO_PAD.encode(signature))
}

/// Parse and verify a session token.
///
/// Any structural defect or signature mismatch yields
/// [`AccountError::SessionInvalid`]; callers treat that as anonymous.
pub fn parse_session_token(secret: &[u8; 32], token: &str) -> AccountResult<Uuid> {
    let Some((session_id_str, signature_b64)) = token.split_once('.') else {
        return Err(AccountError::SessionInvalid);
    };

    let mut mac =
        HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(session_id_str.as_bytes());

    let signature = URL_SAFE_NO_PAD
        .decode(signature_b64)
        .map_err(|_| AccountError::SessionInvalid)?;

    mac.verify_slice(&signature)
        .map_err(|_| AccountError::SessionInvalid)?;

    session_id_str
        .parse()
        .map_err(|_| AccountError::SessionInvalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: [u8; 32] = [7u8; 32];

    #[test]
    fn test_sign_and_parse_roundtrip() {
        let session_id = Uuid::new_v4();
        let token = sign_session_token(&SECRET, session_id);
        assert_eq!(parse_session_token(&SECRET, &token).unwrap(), session_id);
    }

    #[test]
    fn test_tampered_session_id_rejected() {
        let token = sign_session_token(&SECRET, Uuid::new_v4());
        let (_, signature) = token.split_once('.').unwrap();
        let forged = format!("{}.{}", Uuid::new_v4(), signature);
        assert!(matches!(
            parse_session_token(&SECRET, &forged),
            Err(AccountError::SessionInvalid)
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = sign_session_token(&SECRET, Uuid::new_v4());
        let other_secret = [8u8; 32];
        assert!(parse_session_token(&other_secret, &token).is_err());
    }

    #[test]
    fn test_garbage_tokens_rejected() {
        assert!(parse_session_token(&SECRET, "").is_err());
        assert!(parse_session_token(&SECRET, "no-dot-here").is_err());
        assert!(parse_session_token(&SECRET, "a.b.c").is_err());
        assert!(parse_session_token(&SECRET, "not-a-uuid.!!!").is_err());
    }
}
