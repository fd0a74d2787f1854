use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// HMAC-SHA256 verifier for inbound webhook deliveries.
///
/// An empty secret disables verification entirely and every delivery is
/// accepted. This exists for local testing against a tunnel and must never
/// be used for a publicly reachable endpoint.
#[derive(Clone)]
pub struct SignatureVerifier {
    secret: Vec<u8>,
}

impl SignatureVerifier {
    /// New verifier keyed with the shared webhook secret
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Whether deliveries are actually authenticated
    pub fn is_enabled(&self) -> bool {
        !self.secret.is_empty()
    }

    /// Verify a signature header against the raw, unparsed request body
    pub fn verify(&self, raw_body: &[u8], signature_header: Option<&str>) -> bool {
        verify_signature(raw_body, signature_header, &self.secret)
    }
}

impl std::fmt::Debug for SignatureVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureVerifier")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

/// Verify `signature_header` (`sha256=<hex>`) over `raw_body`.
///
/// Always succeeds when `secret` is empty. Fails when a secret is set and
/// the header is missing. The comparison runs in constant time.
pub fn verify_signature(raw_body: &[u8], signature_header: Option<&str>, secret: &[u8]) -> bool {
    if secret.is_empty() {
        return true;
    }
    let Some(provided) = signature_header else {
        return false;
    };

    let expected = sign(raw_body, secret);
    expected.as_bytes().ct_eq(provided.as_bytes()).into()
}

/// Compute the `sha256=<hex>` header value for `raw_body`
pub fn sign(raw_body: &[u8], secret: &[u8]) -> String {
    let mut mac = match HmacSha256::new_from_slice(secret) {
        Ok(mac) => mac,
        Err(_) => unreachable!("HMAC key can be of any size, as per crate documentation"),
    };
    mac.update(raw_body);

    format_signature_header(&hex::encode(mac.finalize().into_bytes()))
}

/// Helper function to format a hex digest for the signature header
pub fn format_signature_header(signature: &str) -> String {
    format!("sha256={signature}")
}
