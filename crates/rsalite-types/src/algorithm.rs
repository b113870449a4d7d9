/// Hash algorithm identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgId {
    Sha256,
}

impl HashAlgId {
    /// Digest size in bytes.
    pub fn output_size(self) -> usize {
        match self {
            HashAlgId::Sha256 => 32,
        }
    }
}

/// JWS signature algorithm identifiers (RFC 7518 section 3.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JwsAlgorithm {
    /// RSASSA-PKCS1-v1_5 using SHA-256.
    Rs256,
}

impl JwsAlgorithm {
    /// The `alg` header value.
    pub fn name(self) -> &'static str {
        match self {
            JwsAlgorithm::Rs256 => "RS256",
        }
    }

    /// Hash used by the signature scheme.
    pub fn hash(self) -> HashAlgId {
        match self {
            JwsAlgorithm::Rs256 => HashAlgId::Sha256,
        }
    }
}
