//! Webhook signature verification.
//!
//! The platform signs each delivery with HMAC-SHA256 over the exact raw
//! request body and sends the base64 digest in the `X-Shopify-Hmac-Sha256`
//! header. Verification must run over the untransformed wire bytes — any
//! parse-then-reserialize step before this check invalidates the signature.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Computes the base64-encoded HMAC-SHA256 of `body` under `secret`.
pub fn compute(secret: &[u8], body: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC accepts keys of any length");
    mac.update(body);
    BASE64.encode(mac.finalize().into_bytes())
}

/// Verifies a claimed signature against the raw body bytes.
///
/// The comparison is constant-time; length mismatches fail without
/// revealing where.
#[must_use]
pub fn verify(secret: &[u8], body: &[u8], provided: &str) -> bool {
    let expected = compute(secret, body);
    expected.as_bytes().ct_eq(provided.as_bytes()).into()
}
