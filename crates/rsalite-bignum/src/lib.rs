#![forbid(unsafe_code)]
#![doc = "Arbitrary-precision integer arithmetic for rsalite."]
//!
//! This engine is **not constant-time**: division, reduction and the
//! exponentiation ladder branch on operand values. Do not use it where an
//! attacker can measure signing time.

mod bignum;
mod exp;
mod montgomery;
mod ops;
mod radix;

pub use bignum::{BigInt, Digit, BI_FP, DB, DM, DV, F1, F2, FV};
pub use montgomery::{Classic, Montgomery, Reducer};
