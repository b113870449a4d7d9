#![forbid(unsafe_code)]
#![doc = "Cryptographic primitives for rsalite: SHA-256 and RSA signatures."]

// Hash algorithms
#[cfg(feature = "sha2")]
pub mod sha2;

// Asymmetric algorithms
#[cfg(feature = "rsa")]
pub mod rsa;
