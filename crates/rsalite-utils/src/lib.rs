#![forbid(unsafe_code)]
#![doc = "Utility functions for rsalite: hex DER locator, Base64, PEM."]

#[cfg(feature = "asn1")]
pub mod asn1;

#[cfg(feature = "base64")]
pub mod base64;

#[cfg(feature = "pem")]
pub mod pem;
