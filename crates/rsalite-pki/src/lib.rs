#![forbid(unsafe_code)]
#![doc = "Private key file handling for rsalite."]

#[cfg(feature = "pkcs8")]
pub mod pkcs8;
