//! String conversion in radix 2 through 36.

use rsalite_types::CryptoError;

use crate::bignum::{BigInt, DB, DM, DV};

const BI_RM: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Character code to digit value; -1 outside `[0-9a-zA-Z]`.
static BI_RC: [i8; 256] = build_rc();

const fn build_rc() -> [i8; 256] {
    let mut rc = [-1i8; 256];
    let mut i = 0;
    while i < 10 {
        rc[b'0' as usize + i] = i as i8;
        i += 1;
    }
    let mut i = 0;
    while i < 26 {
        rc[b'a' as usize + i] = (10 + i) as i8;
        rc[b'A' as usize + i] = (10 + i) as i8;
        i += 1;
    }
    rc
}

/// Digit value of a character, or -1 if it is not alphanumeric.
pub fn int_at(c: u8) -> i32 {
    BI_RC[c as usize] as i32
}

/// Value a character contributes in `radix`.
///
/// Unknown characters decode as `radix - 1`; values past the radix wrap.
fn digit_value(c: u8, radix: u32) -> u32 {
    match int_at(c) {
        v if v < 0 => radix - 1,
        v => v as u32 % radix,
    }
}

/// Lowercase character for a digit value below `radix`.
pub fn digit_char(n: u32, radix: u32) -> Result<char, CryptoError> {
    if n >= radix || n as usize >= BI_RM.len() {
        return Err(CryptoError::DigitOutOfRange { digit: n, radix });
    }
    Ok(BI_RM[n as usize] as char)
}

fn check_radix(radix: u32) -> Result<(), CryptoError> {
    if (2..=36).contains(&radix) {
        Ok(())
    } else {
        Err(CryptoError::BnInvalidRadix(radix))
    }
}

/// Largest `cs` with `radix^cs < DV`, and `radix^cs`.
fn chunk_size(radix: u32) -> (u32, u32) {
    let mut cs = 0;
    let mut p = 1u64;
    while p * (radix as u64) < DV as u64 {
        p *= radix as u64;
        cs += 1;
    }
    (cs, p as u32)
}

impl BigInt {
    /// Parse a string in the given radix.
    ///
    /// A leading `-` negates the result. Parsing never fails on content:
    /// characters outside the radix alphabet are folded into it instead.
    /// Only an unsupported radix is an error.
    pub fn from_str_radix(text: &str, radix: u32) -> Result<Self, CryptoError> {
        check_radix(radix)?;
        let bytes = text.as_bytes();
        let (neg, body) = match bytes.split_first() {
            Some((b'-', rest)) => (true, rest),
            _ => (false, bytes),
        };
        let mag = if radix.is_power_of_two() {
            Self::from_pow2_digits(body, radix)
        } else {
            Self::from_chunked_digits(body, radix)
        };
        Ok(if neg { mag.negate() } else { mag })
    }

    /// Parse a hex string (no prefix; a leading `-` negates).
    pub fn from_hex(text: &str) -> Self {
        let bytes = text.as_bytes();
        match bytes.split_first() {
            Some((b'-', rest)) => Self::from_pow2_digits(rest, 16).negate(),
            _ => Self::from_pow2_digits(bytes, 16),
        }
    }

    fn from_pow2_digits(body: &[u8], radix: u32) -> Self {
        let k = radix.trailing_zeros();
        let mut d: Vec<u32> = Vec::with_capacity(body.len() * k as usize / DB as usize + 1);
        let mut sh = 0u32;
        for &c in body.iter().rev() {
            let x = digit_value(c, radix);
            if sh == 0 {
                d.push(x);
            } else {
                let top = d.len() - 1;
                if sh + k > DB {
                    d[top] |= (x & ((1 << (DB - sh)) - 1)) << sh;
                    d.push(x >> (DB - sh));
                } else {
                    d[top] |= x << sh;
                }
            }
            sh += k;
            if sh >= DB {
                sh -= DB;
            }
        }
        Self::from_digits(d)
    }

    fn from_chunked_digits(body: &[u8], radix: u32) -> Self {
        let (cs, chunk) = chunk_size(radix);
        let mut r = BigInt::new();
        let mut w = 0u32;
        let mut j = 0u32;
        for &c in body {
            w = radix * w + digit_value(c, radix);
            j += 1;
            if j >= cs {
                r.d_multiply(chunk);
                r.d_add_offset(w, 0);
                j = 0;
                w = 0;
            }
        }
        if j > 0 {
            r.d_multiply(radix.pow(j));
            r.d_add_offset(w, 0);
        }
        r
    }

    /// `self = self * n` for a non-negative value and a small factor.
    pub(crate) fn d_multiply(&mut self, n: u32) {
        let mut c = 0u64;
        for i in 0..self.t {
            let v = self.d[i] as u64 * n as u64 + c;
            self.d[i] = (v & DM as u64) as u32;
            c = v >> DB;
        }
        self.d.truncate(self.t);
        self.d.push(c as u32);
        self.t += 1;
        self.clamp();
    }

    /// `self += n * DV^w` for a non-negative value and a digit `n`.
    pub(crate) fn d_add_offset(&mut self, n: u32, w: usize) {
        if n == 0 {
            return;
        }
        self.d.truncate(self.t);
        while self.d.len() <= w {
            self.d.push(0);
        }
        let mut w = w;
        let mut v = self.d[w] + n;
        while v >= DV {
            self.d[w] = v - DV;
            w += 1;
            if w == self.d.len() {
                self.d.push(0);
            }
            v = self.d[w] + 1;
        }
        self.d[w] = v;
        self.t = self.d.len();
    }

    /// Divide a non-negative value by a small divisor, returning the remainder.
    pub(crate) fn div_rem_small(&self, n: u32) -> (BigInt, u32) {
        let mut q = vec![0u32; self.t];
        let mut rem = 0u64;
        for i in (0..self.t).rev() {
            let cur = (rem << DB) | self.d[i] as u64;
            q[i] = (cur / n as u64) as u32;
            rem = cur % n as u64;
        }
        (BigInt::from_digits(q), rem as u32)
    }

    /// `k` bits of a non-negative value starting at bit `pos`.
    fn bits_at(&self, pos: usize, k: u32) -> u32 {
        let i = pos / DB as usize;
        let off = (pos % DB as usize) as u32;
        let mut v = self.digit(i) >> off;
        if off + k > DB {
            v |= self.digit(i + 1) << (DB - off);
        }
        v & ((1 << k) - 1)
    }

    /// Render in the given radix: lowercase, `-` prefix for negatives,
    /// `"0"` for zero.
    pub fn to_str_radix(&self, radix: u32) -> Result<String, CryptoError> {
        check_radix(radix)?;
        if self.s < 0 {
            let mag = self.negate().to_str_radix(radix)?;
            return Ok(format!("-{mag}"));
        }
        if self.signum() == 0 {
            return Ok("0".to_string());
        }
        if radix.is_power_of_two() {
            let k = radix.trailing_zeros();
            let chunks = self.bit_length().div_ceil(k as usize);
            let mut out = String::with_capacity(chunks);
            for c in (0..chunks).rev() {
                out.push(digit_char(self.bits_at(c * k as usize, k), radix)?);
            }
            return Ok(out);
        }

        let (cs, chunk) = chunk_size(radix);
        let mut groups = Vec::new();
        let mut y = self.clone();
        let lead = loop {
            let (q, rem) = y.div_rem_small(chunk);
            if q.is_zero() {
                break rem;
            }
            groups.push(rem);
            y = q;
        };
        let mut out = small_to_str(lead, radix, 0)?;
        for &g in groups.iter().rev() {
            out.push_str(&small_to_str(g, radix, cs as usize)?);
        }
        Ok(out)
    }

    /// Lowercase hex rendering.
    pub fn to_hex(&self) -> String {
        // Radix 16 is always accepted.
        self.to_str_radix(16).unwrap_or_default()
    }
}

/// Render a machine word, zero-padded to at least `width` characters.
fn small_to_str(mut v: u32, radix: u32, width: usize) -> Result<String, CryptoError> {
    let mut buf = Vec::new();
    while v > 0 {
        buf.push(digit_char(v % radix, radix)?);
        v /= radix;
    }
    while buf.len() < width.max(1) {
        buf.push('0');
    }
    Ok(buf.iter().rev().collect())
}
