/// Numeric and codec errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CryptoError {
    // General errors
    #[error("invalid argument")]
    InvalidArg,
    #[error("invalid key")]
    InvalidKey,

    // BigInt errors
    #[error("big number: division by zero")]
    BnDivisionByZero,
    #[error("big number: negative exponent")]
    BnNegativeExponent,
    #[error("big number: unsupported radix {0}")]
    BnInvalidRadix(u32),
    #[error("number does not correspond to a radix-{radix} digit: {digit}")]
    DigitOutOfRange { digit: u32, radix: u32 },

    // RSA errors
    #[error("rsa: modulus too short for padding")]
    RsaInvalidPadding,
    #[error("rsa: public exponent does not fit a machine word")]
    RsaExponentTooLarge,

    // Encoding/Decoding errors
    #[error("decode: invalid base64")]
    DecodeBase64Fail,
    #[error("decode: invalid hex")]
    DecodeHexFail,
    #[error("decode: asn1 buffer failed")]
    DecodeAsn1Fail,
    #[error("decode: asn1 indefinite length")]
    Asn1IndefiniteLength,
    #[error("decode: asn1 child index out of range")]
    Asn1PathNotFound,
    #[error("decode: asn1 tag mismatch: expected {expected:02x}, found {found:02x}")]
    Asn1TagMismatch { expected: u8, found: u8 },
}

/// Private key file errors.
#[derive(Debug, thiserror::Error)]
pub enum PkiError {
    #[error("can't find PEM header")]
    PemNoHeader,
    #[error("not ASN.1 hex string")]
    NotAsn1Hex,
    #[error("malformed PKCS#8 plain RSA private key: {0}")]
    MalformedPrivateKey(String),
    #[error("crypto error: {0}")]
    CryptoError(#[from] CryptoError),
}

/// JSON Web Signature errors.
#[derive(Debug, thiserror::Error)]
pub enum JwsError {
    #[error("private key error: {0}")]
    Pki(#[from] PkiError),
    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),
}
