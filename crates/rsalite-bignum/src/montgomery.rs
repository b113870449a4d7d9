//! Modular reduction strategies used by exponentiation.

use std::cmp::Ordering;

use rsalite_types::CryptoError;

use crate::bignum::{BigInt, DB, DM, DV};

/// A modular multiplication domain.
///
/// Values are mapped in with [`convert`](Reducer::convert), multiplied and
/// squared inside the domain, and mapped back with
/// [`revert`](Reducer::revert).
pub trait Reducer {
    /// Map a value into the reduction domain.
    fn convert(&self, x: &BigInt) -> Result<BigInt, CryptoError>;
    /// Map a domain value back to `[0, m)`.
    fn revert(&self, x: &BigInt) -> Result<BigInt, CryptoError>;
    /// Reduce `x` in place.
    fn reduce(&self, x: &mut BigInt) -> Result<(), CryptoError>;
    /// `r = reduce(x^2)`.
    fn sqr_to(&self, x: &BigInt, r: &mut BigInt) -> Result<(), CryptoError> {
        x.square_to(r);
        self.reduce(r)
    }
    /// `r = reduce(x * y)`.
    fn mul_to(&self, x: &BigInt, y: &BigInt, r: &mut BigInt) -> Result<(), CryptoError> {
        x.multiply_to(y, r);
        self.reduce(r)
    }
}

fn check_modulus(m: &BigInt) -> Result<(), CryptoError> {
    match m.signum() {
        0 => Err(CryptoError::BnDivisionByZero),
        s if s < 0 => Err(CryptoError::InvalidArg),
        _ => Ok(()),
    }
}

impl BigInt {
    /// `-1 / d[0] mod DV`, or 0 when the value is even or zero.
    ///
    /// Newton lifting doubles the number of correct low bits each step.
    pub fn inv_digit(&self) -> u32 {
        if self.t < 1 {
            return 0;
        }
        let x = self.d[0];
        if x & 1 == 0 {
            return 0;
        }
        let mut y = x & 3;
        y = y.wrapping_mul(2u32.wrapping_sub((x & 0xf).wrapping_mul(y))) & 0xf;
        y = y.wrapping_mul(2u32.wrapping_sub((x & 0xff).wrapping_mul(y))) & 0xff;
        y = y.wrapping_mul(2u32.wrapping_sub((x & 0xffff).wrapping_mul(y) & 0xffff)) & 0xffff;
        y = y.wrapping_mul(2u32.wrapping_sub(x.wrapping_mul(y) & DM)) & DM;
        if y > 0 {
            DV - y
        } else {
            0
        }
    }
}

/// Montgomery reduction (HAC 14.32) for odd moduli, with `R = DV^m.t`.
pub struct Montgomery {
    m: BigInt,
    mp: u32,
    mpl: u32,
    mph: u32,
    um: u32,
    mt2: usize,
}

impl Montgomery {
    /// Create a context for a positive odd modulus.
    pub fn new(m: &BigInt) -> Result<Self, CryptoError> {
        check_modulus(m)?;
        if m.is_even() {
            return Err(CryptoError::InvalidArg);
        }
        let mp = m.inv_digit();
        Ok(Self {
            m: m.clone(),
            mp,
            mpl: mp & 0x7fff,
            mph: mp >> 15,
            um: (1 << (DB - 15)) - 1,
            mt2: 2 * m.t,
        })
    }

    /// The modulus.
    pub fn modulus(&self) -> &BigInt {
        &self.m
    }

    /// `-1 / m mod DV`.
    pub fn m_prime(&self) -> u32 {
        self.mp
    }
}

impl Reducer for Montgomery {
    /// `x * R mod m`.
    fn convert(&self, x: &BigInt) -> Result<BigInt, CryptoError> {
        let mut shifted = BigInt::new();
        x.abs_cow().dl_shift_to(self.m.t, &mut shifted);
        let mut r = BigInt::new();
        shifted.div_rem_to(&self.m, &mut r)?;
        if x.s < 0 && r.signum() > 0 {
            r.update(|v, out| self.m.sub_to(v, out));
        }
        Ok(r)
    }

    /// `x / R mod m`.
    fn revert(&self, x: &BigInt) -> Result<BigInt, CryptoError> {
        let mut r = x.clone();
        self.reduce(&mut r)?;
        Ok(r)
    }

    /// `x = x / R mod m`, for non-negative `x < m * R`.
    fn reduce(&self, x: &mut BigInt) -> Result<(), CryptoError> {
        x.d.truncate(x.t);
        while x.t <= self.mt2 {
            x.d.push(0);
            x.t += 1;
        }
        let mt = self.m.t;
        for i in 0..mt {
            // u0 = x[i] * mp mod DV, split to keep the product in 32 bits.
            let xi = x.d[i];
            let j = xi & 0x7fff;
            let u0 = (j * self.mpl + (((j * self.mph + (xi >> 15) * self.mpl) & self.um) << 15)) & DM;
            let c = self.m.am(0, u0 as i64, x, i, 0, mt);
            x.add_carry_at(i + mt, c);
        }
        x.clamp();
        x.update(|v, out| v.dr_shift_to(mt, out));
        if x.compare_to(&self.m) != Ordering::Less {
            x.update(|v, out| v.sub_to(&self.m, out));
        }
        Ok(())
    }
}

/// Plain division-based reduction, used for even moduli.
pub struct Classic {
    m: BigInt,
}

impl Classic {
    /// Create a context for a positive modulus.
    pub fn new(m: &BigInt) -> Result<Self, CryptoError> {
        check_modulus(m)?;
        Ok(Self { m: m.clone() })
    }
}

impl Reducer for Classic {
    fn convert(&self, x: &BigInt) -> Result<BigInt, CryptoError> {
        if x.s < 0 || x.compare_to(&self.m) != Ordering::Less {
            x.modulo(&self.m)
        } else {
            Ok(x.clone())
        }
    }

    fn revert(&self, x: &BigInt) -> Result<BigInt, CryptoError> {
        Ok(x.clone())
    }

    fn reduce(&self, x: &mut BigInt) -> Result<(), CryptoError> {
        let mut r = BigInt::new();
        x.div_rem_to(&self.m, &mut r)?;
        *x = r;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inv_digit() {
        for m0 in [1u32, 3, 5, 0x2f, 0x1234567, DM] {
            let m = BigInt::from_i64(m0 as i64);
            let mp = m.inv_digit();
            assert!(mp < DV);
            // m0 * mp == -1 mod DV
            assert_eq!((m0 as u64 * mp as u64 + 1) % DV as u64, 0, "m0 = {m0:#x}");
        }
        assert_eq!(BigInt::from_i64(4).inv_digit(), 0);
        assert_eq!(BigInt::new().inv_digit(), 0);
    }

    #[test]
    fn test_montgomery_rejects_bad_modulus() {
        assert!(matches!(
            Montgomery::new(&BigInt::from_i64(10)),
            Err(CryptoError::InvalidArg)
        ));
        assert!(matches!(
            Montgomery::new(&BigInt::new()),
            Err(CryptoError::BnDivisionByZero)
        ));
        assert!(matches!(
            Classic::new(&BigInt::from_i64(-7)),
            Err(CryptoError::InvalidArg)
        ));
    }

    #[test]
    fn test_montgomery_roundtrip() {
        let m = BigInt::from_hex("f0e1d2c3b4a5968778695a4b3c2d1e0f1");
        let mont = Montgomery::new(&m).unwrap();
        for v in ["0", "1", "123456789abcdef", "f0e1d2c3b4a5968778695a4b3c2d1e0f0"] {
            let x = BigInt::from_hex(v);
            let xm = mont.convert(&x).unwrap();
            assert!(xm < m);
            assert_eq!(mont.revert(&xm).unwrap(), x, "value {v}");
        }
    }

    #[test]
    fn test_montgomery_convert_negative() {
        let m = BigInt::from_i64(1_000_003);
        let mont = Montgomery::new(&m).unwrap();
        let xm = mont.convert(&BigInt::from_i64(-5)).unwrap();
        assert_eq!(mont.revert(&xm).unwrap(), BigInt::from_i64(1_000_003 - 5));
    }

    #[test]
    fn test_montgomery_mul() {
        let m = BigInt::from_hex("fffffffffffffffffffffffffffffffeffffffffffffffff");
        let mont = Montgomery::new(&m).unwrap();
        let a = BigInt::from_hex("123456789abcdef0123456789abcdef");
        let b = BigInt::from_hex("fedcba9876543210fedcba98765432100");
        let (am, bm) = (mont.convert(&a).unwrap(), mont.convert(&b).unwrap());
        let mut prod = BigInt::new();
        mont.mul_to(&am, &bm, &mut prod).unwrap();
        let expect = a.multiply(&b).modulo(&m).unwrap();
        assert_eq!(mont.revert(&prod).unwrap(), expect);

        let mut sq = BigInt::new();
        mont.sqr_to(&am, &mut sq).unwrap();
        assert_eq!(mont.revert(&sq).unwrap(), a.square().modulo(&m).unwrap());
    }

    #[test]
    fn test_classic_mul() {
        let m = BigInt::from_hex("100000000000000000000");
        let classic = Classic::new(&m).unwrap();
        let a = BigInt::from_hex("-123456789abcdef0123456789");
        let am = classic.convert(&a).unwrap();
        assert_eq!(am, a.modulo(&m).unwrap());
        let mut r = BigInt::new();
        classic.mul_to(&am, &am, &mut r).unwrap();
        assert_eq!(r, a.square().modulo(&m).unwrap());
    }
}
