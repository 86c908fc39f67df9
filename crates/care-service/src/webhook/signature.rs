//! `Stripe-Signature` header verification
//!
//! The header looks like `t=1492774577,v1=5257a8...,v0=6ffbb5...`. The `v1`
//! entries are hex HMAC-SHA256 digests of `"{t}.{raw body}"` keyed with the
//! endpoint's signing secret.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the delivery signature
pub const SIGNATURE_HEADER: &str = "stripe-signature";

/// Maximum age, in seconds, of a delivery's signed timestamp
pub const TOLERANCE_SECS: i64 = 300;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    #[error("Unable to extract timestamp and signatures from header")]
    MalformedHeader,

    #[error("No signatures found matching the expected signature for payload")]
    NoMatchingSignature,

    #[error("Timestamp outside the tolerance zone")]
    TimestampOutsideTolerance,

    #[error("Invalid signing secret")]
    InvalidSecret,
}

fn mac_for(secret: &str, timestamp: i64, payload: &[u8]) -> Result<HmacSha256, SignatureError> {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).map_err(|_| SignatureError::InvalidSecret)?;
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    Ok(mac)
}

/// Verify `header` against `payload` at unix time `now`
pub fn verify_signature(
    payload: &[u8],
    header: &str,
    secret: &str,
    now: i64,
) -> Result<(), SignatureError> {
    let mut timestamp = None;
    let mut signatures = Vec::new();

    for part in header.split(',') {
        let Some((key, value)) = part.trim().split_once('=') else {
            continue;
        };
        match key {
            "t" => timestamp = value.parse::<i64>().ok(),
            "v1" => signatures.push(value),
            _ => {}
        }
    }

    let timestamp = timestamp.ok_or(SignatureError::MalformedHeader)?;
    if signatures.is_empty() {
        return Err(SignatureError::NoMatchingSignature);
    }

    let matched = signatures.iter().any(|candidate| {
        let Ok(expected) = hex::decode(candidate) else {
            return false;
        };
        mac_for(secret, timestamp, payload).is_ok_and(|mac| mac.verify_slice(&expected).is_ok())
    });
    if !matched {
        return Err(SignatureError::NoMatchingSignature);
    }

    if (now - timestamp).abs() > TOLERANCE_SECS {
        return Err(SignatureError::TimestampOutsideTolerance);
    }

    Ok(())
}

/// Build a header value signing `payload` at `timestamp`.
/// Used to produce test deliveries.
pub fn sign_payload(payload: &[u8], secret: &str, timestamp: i64) -> Result<String, SignatureError> {
    let digest = mac_for(secret, timestamp, payload)?.finalize().into_bytes();
    Ok(format!("t={timestamp},v1={}", hex::encode(digest)))
}
