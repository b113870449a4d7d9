#![forbid(unsafe_code)]
#![doc = "Common error types and algorithm identifiers for rsalite."]

pub mod algorithm;
pub mod error;

pub use algorithm::*;
pub use error::*;
