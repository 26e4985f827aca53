//! Compact HS256 JSON Web Tokens.
//!
//! Only what the admin login needs: a fixed `{"alg":"HS256","typ":"JWT"}`
//! header, `sub` and `exp` claims, base64url segments without padding.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "HS256";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token is malformed")]
    Malformed,

    #[error("unsupported token algorithm")]
    UnsupportedAlgorithm,

    #[error("token signature does not match")]
    BadSignature,

    #[error("token has expired")]
    Expired,
}

#[derive(Debug, Serialize, Deserialize)]
struct Header {
    alg: String,
    typ: String,
}

/// Claims carried by an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the admin username.
    pub sub: String,
    /// Expiry as seconds since the Unix epoch.
    pub exp: i64,
}

fn mac(secret: &[u8]) -> HmacSha256 {
    // HMAC is defined for keys of any length
    match HmacSha256::new_from_slice(secret) {
        Ok(mac) => mac,
        Err(_) => unreachable!("HMAC accepts any key length"),
    }
}

fn encode_segment<T: Serialize>(value: &T) -> String {
    // Header and Claims contain only strings and integers
    let json = serde_json::to_vec(value).unwrap_or_default();
    URL_SAFE_NO_PAD.encode(json)
}

fn decode_segment<T: for<'de> Deserialize<'de>>(segment: &str) -> Result<T, TokenError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|_| TokenError::Malformed)?;
    serde_json::from_slice(&bytes).map_err(|_| TokenError::Malformed)
}

/// Signs `claims` with `secret` and returns the compact token.
pub fn encode(claims: &Claims, secret: &[u8]) -> String {
    let header = Header {
        alg: ALGORITHM.to_string(),
        typ: "JWT".to_string(),
    };
    let signing_input = format!("{}.{}", encode_segment(&header), encode_segment(claims));

    let mut mac = mac(secret);
    mac.update(signing_input.as_bytes());
    let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

    format!("{}.{}", signing_input, signature)
}

/// Verifies signature and expiry of `token` at time `now`.
///
/// The signature is checked before the claims are trusted.
///
/// # Errors
///
/// Returns the first [`TokenError`] encountered.
pub fn decode(token: &str, secret: &[u8], now: DateTime<Utc>) -> Result<Claims, TokenError> {
    let mut parts = token.split('.');
    let (Some(header_segment), Some(payload_segment), Some(signature), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(TokenError::Malformed);
    };

    let header: Header = decode_segment(header_segment)?;
    if header.alg != ALGORITHM {
        return Err(TokenError::UnsupportedAlgorithm);
    }

    let signature = URL_SAFE_NO_PAD
        .decode(signature)
        .map_err(|_| TokenError::Malformed)?;

    let mut mac = mac(secret);
    mac.update(header_segment.as_bytes());
    mac.update(b".");
    mac.update(payload_segment.as_bytes());
    mac.verify_slice(&signature)
        .map_err(|_| TokenError::BadSignature)?;

    let claims: Claims = decode_segment(payload_segment)?;
    if claims.exp <= now.timestamp() {
        return Err(TokenError::Expired);
    }

    Ok(claims)
}
