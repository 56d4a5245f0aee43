//! Webhook signature verification (`X-Hub-Signature-256`).

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the request signature.
pub const SIGNATURE_HEADER: &str = "x-hub-signature-256";

const SIGNATURE_PREFIX: &str = "sha256=";

/// Errors raised while authenticating a webhook request.
#[derive(Debug, PartialEq)]
pub enum SignatureError {
    /// The signature header is absent or not valid header text.
    Missing,
    /// The signature does not match the body.
    Mismatch,
    /// The configured secret cannot key an HMAC.
    InvalidKey,
}

impl std::fmt::Display for SignatureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignatureError::Missing => write!(f, "Signature header is missing"),
            SignatureError::Mismatch => write!(f, "Signature does not match request body"),
            SignatureError::InvalidKey => write!(f, "Webhook secret is not a usable HMAC key"),
        }
    }
}

impl std::error::Error for SignatureError {}

/// Renders the expected header value for `body`: `sha256=<lowercase hex>`.
pub fn sign(body: &[u8], secret: &[u8]) -> Result<String, SignatureError> {
    let mut mac = new_mac(secret)?;
    mac.update(body);
    Ok(format!(
        "{}{}",
        SIGNATURE_PREFIX,
        hex::encode(mac.finalize().into_bytes())
    ))
}

/// Checks `claimed` against the HMAC-SHA256 of the raw, unparsed body.
///
/// Only the exact rendering produced by [`sign`] is accepted; the digest
/// comparison itself is constant-time.
pub fn verify(body: &[u8], secret: &[u8], claimed: Option<&str>) -> Result<(), SignatureError> {
    let claimed = claimed.ok_or(SignatureError::Missing)?;

    let hex_part = claimed
        .strip_prefix(SIGNATURE_PREFIX)
        .ok_or(SignatureError::Mismatch)?;
    if !hex_part
        .bytes()
        .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
    {
        return Err(SignatureError::Mismatch);
    }
    let claimed_bytes = hex::decode(hex_part).map_err(|_| SignatureError::Mismatch)?;

    let mut mac = new_mac(secret)?;
    mac.update(body);
    mac.verify_slice(&claimed_bytes)
        .map_err(|_| SignatureError::Mismatch)
}

fn new_mac(secret: &[u8]) -> Result<HmacSha256, SignatureError> {
    HmacSha256::new_from_slice(secret).map_err(|_| SignatureError::InvalidKey)
}
