//! Compact JWS serialization (RFC 7515 section 7.1) with RS256 (RFC 7518
//! section 3.3).
//!
//! Header and payload are taken as already-serialized JSON; they are
//! neither parsed nor validated.

use rsalite_crypto::rsa::RsaPrivateKey;
use rsalite_types::{JwsAlgorithm, JwsError};
use rsalite_utils::base64;

/// The default protected header.
pub const RS256_HEADER: &str = r#"{"alg":"RS256","typ":"JWT"}"#;

/// `base64url(header) || '.' || base64url(payload)`.
pub fn signing_input(header: &str, payload: &str) -> String {
    let mut out = base64::encode_url_safe_no_pad(header.as_bytes());
    out.push('.');
    out.push_str(&base64::encode_url_safe_no_pad(payload.as_bytes()));
    out
}

/// Sign `header` and `payload` with the PKCS#8 PEM key `pem` and return the
/// compact JWS.
pub fn create_jwt(header: &str, payload: &str, pem: &str) -> Result<String, JwsError> {
    JwtSigner::from_pem(pem)?.sign(header, payload)
}

/// An RS256 signer holding a parsed private key.
#[derive(Debug, Clone)]
pub struct JwtSigner {
    key: RsaPrivateKey,
    alg: JwsAlgorithm,
}

impl JwtSigner {
    /// Create a signer for an already-parsed key.
    pub fn new(key: RsaPrivateKey) -> Self {
        Self {
            key,
            alg: JwsAlgorithm::Rs256,
        }
    }

    /// Parse a PEM-armored PKCS#8 key.
    pub fn from_pem(pem: &str) -> Result<Self, JwsError> {
        Ok(Self::new(rsalite_pki::pkcs8::parse_pkcs8_pem(pem)?))
    }

    /// Signature algorithm.
    pub fn algorithm(&self) -> JwsAlgorithm {
        self.alg
    }

    /// The signing key.
    pub fn key(&self) -> &RsaPrivateKey {
        &self.key
    }

    /// Return the compact JWS `header.payload.signature`.
    pub fn sign(&self, header: &str, payload: &str) -> Result<String, JwsError> {
        let mut jws = signing_input(header, payload);
        let signature = self.key.sign_message(self.alg.hash(), jws.as_bytes())?;
        log::debug!(
            "jws: {} signature over {} byte signing input, {}-bit key",
            self.alg.name(),
            jws.len(),
            self.key.bits()
        );
        jws.push('.');
        jws.push_str(&base64::encode_url_safe_no_pad(&signature));
        Ok(jws)
    }

    /// Sign `payload` under [`RS256_HEADER`].
    pub fn sign_payload(&self, payload: &str) -> Result<String, JwsError> {
        self.sign(RS256_HEADER, payload)
    }
}
