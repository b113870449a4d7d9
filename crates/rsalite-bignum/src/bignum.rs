//! Big integer type and basic queries.

use std::cmp::Ordering;
use std::fmt;

use rsalite_types::CryptoError;
use zeroize::Zeroize;

/// Digit type. Only the low [`DB`] bits of a digit are used.
pub type Digit = u32;

/// Bits per digit.
pub const DB: u32 = 26;
/// Digit mask, `2^DB - 1`.
pub const DM: u32 = (1 << DB) - 1;
/// Digit radix, `2^DB`.
pub const DV: u32 = 1 << DB;
/// Mantissa bits assumed by the quotient-digit estimate in division.
pub const BI_FP: u32 = 52;
/// `2^BI_FP` as a float.
pub const FV: f64 = (1u64 << BI_FP) as f64;
/// `BI_FP - DB`.
pub const F1: u32 = BI_FP - DB;
/// `2 * DB - BI_FP`.
pub const F2: u32 = 2 * DB - BI_FP;

/// A heap-allocated signed big integer that is zeroized on drop.
///
/// The value is `sum(d[i] * 2^(DB*i), i < t)` plus a sign extension: a
/// negative number has `s == -1` and its digits hold the two's complement
/// form, so `-1` is `t == 0, s == -1`. After every mutating operation the
/// value is clamped: `t` is minimal and `d[t-1]` differs from `s & DM`.
#[derive(Clone, Default, Zeroize)]
#[zeroize(drop)]
pub struct BigInt {
    /// Little-endian digits. Entries at `t` and above are scratch.
    pub(crate) d: Vec<Digit>,
    /// Number of significant digits.
    pub(crate) t: usize,
    /// Sign extension word, 0 or -1.
    pub(crate) s: i32,
}

/// Number of significant bits in a digit, with `nbits(0) == 1`.
pub(crate) fn nbits(x: u32) -> u32 {
    if x == 0 {
        1
    } else {
        32 - x.leading_zeros()
    }
}

impl BigInt {
    /// Create a zero-valued BigInt.
    pub fn new() -> Self {
        Self::default()
    }

    /// The value one.
    pub fn one() -> Self {
        Self::from_i64(1)
    }

    /// Create a BigInt from a signed machine integer.
    pub fn from_i64(value: i64) -> Self {
        let mut r = Self::new();
        r.set_i64(value);
        r
    }

    /// Create a BigInt from a `u64`.
    pub fn from_u64(value: u64) -> Self {
        let mut d = Vec::with_capacity(3);
        let mut v = value;
        while v != 0 {
            d.push((v & DM as u64) as u32);
            v >>= DB;
        }
        Self::from_digits(d)
    }

    /// Overwrite `self` with a machine integer.
    pub fn set_i64(&mut self, value: i64) {
        self.d.clear();
        self.s = if value < 0 { -1 } else { 0 };
        // Arithmetic shift keeps the two's complement digits of negatives.
        let mut v = value;
        while v != 0 && v != -1 {
            self.d.push((v & DM as i64) as u32);
            v >>= DB;
        }
        self.t = self.d.len();
        self.clamp();
    }

    /// Build a non-negative value from little-endian digits.
    pub(crate) fn from_digits(d: Vec<Digit>) -> Self {
        let t = d.len();
        let mut r = Self { d, t, s: 0 };
        BigInt::clamp(&mut r);
        r
    }

    /// Digit `i`, or the sign extension beyond `t`.
    pub(crate) fn digit(&self, i: usize) -> u32 {
        if i < self.t {
            self.d[i]
        } else {
            self.s as u32 & DM
        }
    }

    /// Drop high digits equal to the sign extension.
    pub fn clamp(&mut self) {
        let c = self.s as u32 & DM;
        while self.t > 0 && self.d[self.t - 1] == c {
            self.t -= 1;
        }
        self.d.truncate(self.t);
    }

    /// Copy the value of `self` into `r`, reusing its storage.
    pub fn copy_to(&self, r: &mut BigInt) {
        r.d.clear();
        r.d.extend_from_slice(&self.d[..self.t]);
        r.t = self.t;
        r.s = self.s;
    }

    /// Number of significant digits.
    pub fn num_digits(&self) -> usize {
        self.t
    }

    /// Return true if this number is zero.
    pub fn is_zero(&self) -> bool {
        self.t == 0 && self.s == 0
    }

    /// Return true if this number is negative.
    pub fn is_negative(&self) -> bool {
        self.s < 0
    }

    /// Return true if the lowest bit is clear.
    pub fn is_even(&self) -> bool {
        let low = if self.t > 0 { self.d[0] & 1 } else { self.s as u32 & 1 };
        low == 0
    }

    /// -1, 0 or 1.
    pub fn signum(&self) -> i32 {
        if self.s < 0 {
            -1
        } else if self.t == 0 || (self.t == 1 && self.d[0] == 0) {
            0
        } else {
            1
        }
    }

    /// Bits needed for `|self|`, 0 for zero.
    ///
    /// Negative values report the bit length of their digit-level complement,
    /// so `(-1).bit_length() == 0`.
    pub fn bit_length(&self) -> usize {
        if self.t == 0 {
            return 0;
        }
        let top = self.d[self.t - 1] ^ (self.s as u32 & DM);
        DB as usize * (self.t - 1) + nbits(top) as usize
    }

    /// Test bit `n` of the two's complement form.
    pub fn test_bit(&self, n: usize) -> bool {
        let j = n / DB as usize;
        if j >= self.t {
            return self.s != 0;
        }
        self.d[j] & (1 << (n % DB as usize)) != 0
    }

    /// Low 32 bits of the value as a two's complement `i32`.
    pub fn int_value(&self) -> i32 {
        if self.s < 0 {
            match self.t {
                1 => return self.d[0] as i32 - DV as i32,
                0 => return -1,
                _ => {}
            }
        } else if self.t == 1 {
            return self.d[0] as i32;
        } else if self.t == 0 {
            return 0;
        }
        // Assumes DB < 32: low 6 bits of d[1] land in the top of the word.
        let lo = self.d[0];
        let hi = self.d[1] & ((1 << (32 - DB)) - 1);
        ((hi << DB) | lo) as i32
    }

    /// Three-way comparison.
    pub fn compare_to(&self, a: &BigInt) -> Ordering {
        if self.s != a.s {
            // s is 0 or -1, so the larger sign word is the larger value.
            return self.s.cmp(&a.s);
        }
        if self.t != a.t {
            return if self.s < 0 {
                a.t.cmp(&self.t)
            } else {
                self.t.cmp(&a.t)
            };
        }
        for i in (0..self.t).rev() {
            match self.d[i].cmp(&a.d[i]) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }
        Ordering::Equal
    }

    /// Create a non-negative BigInt from big-endian bytes.
    pub fn from_bytes_be(bytes: &[u8]) -> Self {
        let mut d = Vec::with_capacity(bytes.len() * 8 / DB as usize + 1);
        let mut acc: u64 = 0;
        let mut bits = 0u32;
        for &b in bytes.iter().rev() {
            acc |= (b as u64) << bits;
            bits += 8;
            while bits >= DB {
                d.push((acc & DM as u64) as u32);
                acc >>= DB;
                bits -= DB;
            }
        }
        if bits > 0 {
            d.push(acc as u32);
        }
        Self::from_digits(d)
    }

    /// Export `|self|` as minimal big-endian bytes (`[0]` for zero).
    pub fn to_bytes_be(&self) -> Vec<u8> {
        let mag = self.abs();
        let bits = mag.bit_length();
        if bits == 0 {
            return vec![0];
        }
        let num_bytes = bits.div_ceil(8);
        let mut out = vec![0u8; num_bytes];
        let mut acc: u64 = 0;
        let mut have = 0u32;
        let mut pos = num_bytes;
        for &dg in &mag.d[..mag.t] {
            acc |= (dg as u64) << have;
            have += DB;
            while have >= 8 && pos > 0 {
                pos -= 1;
                out[pos] = acc as u8;
                acc >>= 8;
                have -= 8;
            }
        }
        while pos > 0 && have > 0 {
            pos -= 1;
            out[pos] = acc as u8;
            acc >>= 8;
            have = have.saturating_sub(8);
        }
        out
    }

    /// Export `|self|` as big-endian bytes left-padded to `len`.
    pub fn to_bytes_be_padded(&self, len: usize) -> Result<Vec<u8>, CryptoError> {
        let bytes = if self.is_zero() {
            Vec::new()
        } else {
            self.to_bytes_be()
        };
        if bytes.len() > len {
            return Err(CryptoError::InvalidArg);
        }
        let mut out = vec![0u8; len];
        out[len - bytes.len()..].copy_from_slice(&bytes);
        Ok(out)
    }
}

impl PartialEq for BigInt {
    fn eq(&self, other: &Self) -> bool {
        self.compare_to(other) == Ordering::Equal
    }
}

impl Eq for BigInt {}

impl PartialOrd for BigInt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BigInt {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare_to(other)
    }
}

impl From<i64> for BigInt {
    fn from(value: i64) -> Self {
        Self::from_i64(value)
    }
}

impl fmt::Debug for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BigInt({self:x})")
    }
}

impl fmt::Display for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.to_str_radix(10).map_err(|_| fmt::Error)?;
        f.write_str(&s)
    }
}

impl fmt::LowerHex for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.to_str_radix(16).map_err(|_| fmt::Error)?;
        f.write_str(&s)
    }
}
