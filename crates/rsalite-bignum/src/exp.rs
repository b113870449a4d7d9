//! Sliding-window modular exponentiation.

use rsalite_types::CryptoError;

use crate::bignum::{nbits, BigInt, DB};
use crate::montgomery::{Classic, Montgomery, Reducer};

/// Window size for a given exponent bit length.
fn window_size(bits: usize) -> u32 {
    if bits < 18 {
        1
    } else if bits < 48 {
        3
    } else if bits < 144 {
        4
    } else if bits < 768 {
        5
    } else {
        6
    }
}

/// Split the round-robin buffers into (current, other).
fn pair(bufs: &mut [BigInt; 2], cur: usize) -> (&mut BigInt, &mut BigInt) {
    let [a, b] = bufs;
    if cur == 0 {
        (a, b)
    } else {
        (b, a)
    }
}

impl BigInt {
    /// `self^e mod m`.
    ///
    /// Odd moduli use Montgomery reduction, even moduli plain division.
    /// The result is in `[0, m)`, except that a zero exponent yields 1 for
    /// every modulus.
    pub fn mod_pow(&self, e: &BigInt, m: &BigInt) -> Result<BigInt, CryptoError> {
        if e.s < 0 {
            return Err(CryptoError::BnNegativeExponent);
        }
        match m.signum() {
            0 => return Err(CryptoError::BnDivisionByZero),
            s if s < 0 => return Err(CryptoError::InvalidArg),
            _ => {}
        }
        let bits = e.bit_length();
        if bits == 0 {
            return Ok(BigInt::one());
        }
        let k = window_size(bits);
        log::trace!(
            "mod_pow: {} bit exponent, {} bit modulus, window {}",
            bits,
            m.bit_length(),
            k
        );
        if m.is_even() {
            sliding_window(&Classic::new(m)?, self, e, k)
        } else {
            sliding_window(&Montgomery::new(m)?, self, e, k)
        }
    }

    /// `self^e mod m` for a machine-word exponent.
    pub fn mod_pow_int(&self, e: u64, m: &BigInt) -> Result<BigInt, CryptoError> {
        self.mod_pow(&BigInt::from_u64(e), m)
    }
}

/// Left-to-right sliding window over the exponent bits (HAC 14.85).
///
/// Only odd powers are tabulated: trailing zeros of each window are
/// pushed into the squarings that follow it.
fn sliding_window<R: Reducer>(
    z: &R,
    base: &BigInt,
    e: &BigInt,
    k: u32,
) -> Result<BigInt, CryptoError> {
    let k1 = k - 1;
    let km: u32 = (1 << k) - 1;

    let mut g = vec![BigInt::new(); 1 << k];
    g[1] = z.convert(base)?;
    if k > 1 {
        let mut g2 = BigInt::new();
        z.sqr_to(&g[1], &mut g2)?;
        let mut n = 3;
        while n <= km as usize {
            let mut gn = BigInt::new();
            z.mul_to(&g2, &g[n - 2], &mut gn)?;
            g[n] = gn;
            n += 2;
        }
    }

    let mut bufs = [BigInt::new(), BigInt::new()];
    let mut cur = 0usize;
    let mut is1 = true;
    // Bit cursor: digit j, bit i within it.
    let mut j = e.t as isize - 1;
    let mut i = nbits(e.d[j as usize]) as isize - 1;
    while j >= 0 {
        let ej = e.d[j as usize];
        let mut w = if i >= k1 as isize {
            (ej >> (i - k1 as isize) as u32) & km
        } else {
            let mut w = (ej & ((1u32 << (i + 1) as u32) - 1)) << (k1 as isize - i) as u32;
            if j > 0 {
                w |= e.d[j as usize - 1] >> (DB as isize + i - k1 as isize) as u32;
            }
            w
        };

        let mut n = k as isize;
        while w & 1 == 0 {
            w >>= 1;
            n -= 1;
        }
        i -= n;
        if i < 0 {
            i += DB as isize;
            j -= 1;
        }

        if is1 {
            g[w as usize].copy_to(&mut bufs[cur]);
            is1 = false;
        } else {
            {
                let (r, r2) = pair(&mut bufs, cur);
                while n > 1 {
                    z.sqr_to(r, r2)?;
                    z.sqr_to(r2, r)?;
                    n -= 2;
                }
                if n > 0 {
                    z.sqr_to(r, r2)?;
                } else {
                    cur ^= 1;
                }
            }
            let (r, r2) = pair(&mut bufs, cur);
            z.mul_to(r2, &g[w as usize], r)?;
        }

        while j >= 0 && e.d[j as usize] & (1u32 << i as u32) == 0 {
            let (r, r2) = pair(&mut bufs, cur);
            z.sqr_to(r, r2)?;
            cur ^= 1;
            i -= 1;
            if i < 0 {
                i = DB as isize - 1;
                j -= 1;
            }
        }
    }
    z.revert(&bufs[cur])
}
