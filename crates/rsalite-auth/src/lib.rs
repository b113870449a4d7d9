#![forbid(unsafe_code)]
#![doc = "Token signing for rsalite."]

#[cfg(feature = "jwt")]
pub mod jwt;
