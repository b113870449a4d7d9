//! Big integer arithmetic: add, subtract, multiply, shift, divide.

use std::borrow::Cow;
use std::cmp::Ordering;

use rsalite_types::CryptoError;
use zeroize::Zeroizing;

use crate::bignum::{nbits, BigInt, DB, DM, F1, F2, FV};

impl BigInt {
    /// `|self|`, borrowing when already non-negative.
    pub(crate) fn abs_cow(&self) -> Cow<'_, BigInt> {
        if self.s < 0 {
            Cow::Owned(self.negate())
        } else {
            Cow::Borrowed(self)
        }
    }

    /// Replace `self` with `op(old_self, &mut fresh)`.
    pub(crate) fn update(&mut self, op: impl FnOnce(&BigInt, &mut BigInt)) {
        let old = std::mem::take(self);
        op(&old, self);
    }

    /// Multiply-accumulate over `n` digits:
    /// `w[j..j+n] += x * self[i..i+n] + c`, returning the outgoing carry.
    ///
    /// Every intermediate stays below 2^53, so the carry fits comfortably.
    pub(crate) fn am(&self, i: usize, x: i64, w: &mut BigInt, j: usize, c: i64, n: usize) -> i64 {
        let mut c = c;
        for k in 0..n {
            let v = x * self.d[i + k] as i64 + w.d[j + k] as i64 + c;
            c = v >> DB;
            w.d[j + k] = (v & DM as i64) as u32;
        }
        c
    }

    /// Add a non-negative carry at digit `k`, extending storage as needed.
    pub(crate) fn add_carry_at(&mut self, k: usize, c: i64) {
        debug_assert!(c >= 0);
        let mut k = k;
        let mut c = c;
        while c != 0 {
            if k == self.d.len() {
                self.d.push(0);
            }
            let v = self.d[k] as i64 + c;
            self.d[k] = (v & DM as i64) as u32;
            c = v >> DB;
            k += 1;
        }
        if k > self.t {
            self.t = k;
        }
    }

    /// `r = self + a`.
    pub fn add_to(&self, a: &BigInt, r: &mut BigInt) {
        let m = self.t.min(a.t);
        let mut out = Vec::with_capacity(self.t.max(a.t) + 1);
        let mut c: i64 = 0;
        for i in 0..m {
            c += self.d[i] as i64 + a.d[i] as i64;
            out.push((c & DM as i64) as u32);
            c >>= DB;
        }
        if a.t < self.t {
            c += a.s as i64;
            for i in m..self.t {
                c += self.d[i] as i64;
                out.push((c & DM as i64) as u32);
                c >>= DB;
            }
            c += self.s as i64;
        } else {
            c += self.s as i64;
            for i in m..a.t {
                c += a.d[i] as i64;
                out.push((c & DM as i64) as u32);
                c >>= DB;
            }
            c += a.s as i64;
        }
        let s = if c < 0 { -1 } else { 0 };
        if c > 0 {
            out.push(c as u32);
        } else if c < -1 {
            out.push((DM as i64 + 1 + c) as u32);
        }
        r.t = out.len();
        r.d = out;
        r.s = s;
        r.clamp();
    }

    /// `r = self - a`.
    pub fn sub_to(&self, a: &BigInt, r: &mut BigInt) {
        let m = self.t.min(a.t);
        let mut out = Vec::with_capacity(self.t.max(a.t) + 1);
        let mut c: i64 = 0;
        for i in 0..m {
            c += self.d[i] as i64 - a.d[i] as i64;
            out.push((c & DM as i64) as u32);
            c >>= DB;
        }
        if a.t < self.t {
            c -= a.s as i64;
            for i in m..self.t {
                c += self.d[i] as i64;
                out.push((c & DM as i64) as u32);
                c >>= DB;
            }
            c += self.s as i64;
        } else {
            c += self.s as i64;
            for i in m..a.t {
                c -= a.d[i] as i64;
                out.push((c & DM as i64) as u32);
                c >>= DB;
            }
            c -= a.s as i64;
        }
        let s = if c < 0 { -1 } else { 0 };
        if c < -1 {
            out.push((DM as i64 + 1 + c) as u32);
        } else if c > 0 {
            out.push(c as u32);
        }
        r.t = out.len();
        r.d = out;
        r.s = s;
        r.clamp();
    }

    /// `r = self * a`. The result sign is negative iff the signs differ.
    pub fn multiply_to(&self, a: &BigInt, r: &mut BigInt) {
        let x = self.abs_cow();
        let y = a.abs_cow();
        let n = x.t + y.t;
        r.d.clear();
        r.d.resize(n, 0);
        r.t = n;
        r.s = 0;
        for i in 0..y.t {
            let c = x.am(0, y.d[i] as i64, r, i, 0, x.t);
            r.d[i + x.t] = c as u32;
        }
        r.clamp();
        if self.s != a.s {
            r.update(|v, out| BigInt::new().sub_to(v, out));
        }
    }

    /// `r = self^2`.
    pub fn square_to(&self, r: &mut BigInt) {
        let x = self.abs_cow();
        r.s = 0;
        if x.t == 0 {
            r.d.clear();
            r.t = 0;
            return;
        }
        let n = 2 * x.t;
        r.d.clear();
        r.d.resize(n, 0);
        r.t = n;
        for i in 0..x.t - 1 {
            // Diagonal term, then the doubled cross terms to its left.
            let c = x.am(i, x.d[i] as i64, r, 2 * i, 0, 1);
            let c = x.am(i + 1, 2 * x.d[i] as i64, r, 2 * i + 1, c, x.t - i - 1);
            r.add_carry_at(i + x.t, c);
        }
        let i = x.t - 1;
        let c = x.am(i, x.d[i] as i64, r, 2 * i, 0, 1);
        r.add_carry_at(2 * i + 1, c);
        r.clamp();
    }

    /// `r = self << (n * DB)`.
    pub fn dl_shift_to(&self, n: usize, r: &mut BigInt) {
        r.d.clear();
        r.d.resize(n, 0);
        r.d.extend_from_slice(&self.d[..self.t]);
        r.t = self.t + n;
        r.s = self.s;
        r.clamp();
    }

    /// `r = self >> (n * DB)`.
    pub fn dr_shift_to(&self, n: usize, r: &mut BigInt) {
        let from = n.min(self.t);
        r.d.clear();
        r.d.extend_from_slice(&self.d[from..self.t]);
        r.t = self.t - from;
        r.s = self.s;
        r.clamp();
    }

    /// `r = self << n`.
    pub fn l_shift_to(&self, n: usize, r: &mut BigInt) {
        let bs = (n % DB as usize) as u32;
        let cbs = DB - bs;
        let bm: u32 = (1 << cbs) - 1;
        let ds = n / DB as usize;
        let mut c: u32 = ((self.s as i64) << bs) as u32 & DM;
        r.d.clear();
        r.d.resize(self.t + ds + 1, 0);
        for i in (0..self.t).rev() {
            r.d[i + ds + 1] = (self.d[i] >> cbs) | c;
            c = (self.d[i] & bm) << bs;
        }
        r.d[ds] = c;
        r.t = self.t + ds + 1;
        r.s = self.s;
        r.clamp();
    }

    /// `r = self >> n`, rounding toward negative infinity.
    pub fn r_shift_to(&self, n: usize, r: &mut BigInt) {
        r.s = self.s;
        let ds = n / DB as usize;
        if ds >= self.t {
            r.d.clear();
            r.t = 0;
            return;
        }
        let bs = (n % DB as usize) as u32;
        let cbs = DB - bs;
        let bm: u32 = (1 << bs) - 1;
        let len = self.t - ds;
        r.d.clear();
        r.d.resize(len, 0);
        r.d[0] = self.d[ds] >> bs;
        for i in ds + 1..self.t {
            r.d[i - ds - 1] |= ((self.d[i] & bm) << cbs) & DM;
            r.d[i - ds] = self.d[i] >> bs;
        }
        if bs > 0 {
            r.d[len - 1] |= ((self.s as u32 & bm) << cbs) & DM;
        }
        r.t = len;
        r.clamp();
    }

    /// Truncated division: `|q| = |self| / |m|`, the quotient is negative
    /// iff the signs differ and the remainder takes the dividend's sign.
    pub fn div_rem(&self, m: &BigInt) -> Result<(BigInt, BigInt), CryptoError> {
        let pm = m.abs_cow();
        if pm.t == 0 {
            return Err(CryptoError::BnDivisionByZero);
        }
        let pt = self.abs_cow();
        if pt.t < pm.t {
            return Ok((BigInt::new(), self.clone()));
        }

        // Normalize so the divisor's top digit has its high bit set.
        let nsh = (DB - nbits(pm.d[pm.t - 1])) as usize;
        let mut y = BigInt::new();
        pm.l_shift_to(nsh, &mut y);
        let mut rem = BigInt::new();
        pt.l_shift_to(nsh, &mut rem);

        let ys = y.t;
        let y0 = y.d[ys - 1];
        let y1 = if ys > 1 { y.d[ys - 2] } else { 0 };
        let yt = y0 as f64 * (1u64 << F1) as f64 + (y1 >> F2) as f64;
        let d1 = FV / yt;
        let d2 = (1u64 << F1) as f64 / yt;
        let e = (1u64 << F2) as f64;

        // One spare leading digit so every window has a head digit.
        let mut r = Zeroizing::new(rem.d[..rem.t].to_vec());
        r.push(0);
        let steps = r.len() - ys;
        let mut q = vec![0u32; steps];
        for j in (0..steps).rev() {
            let i = j + ys;
            let est = (r[i] as f64 * d1 + (r[i - 1] as f64 + e) * d2).floor();
            let mut qd = if est >= DM as f64 { DM as i64 } else { est as i64 };

            let mut c: i64 = 0;
            for k in 0..ys {
                let v = r[j + k] as i64 - qd * y.d[k] as i64 + c;
                r[j + k] = (v & DM as i64) as u32;
                c = v >> DB;
            }
            let mut top = r[i] as i64 + c;

            while top < 0 {
                qd -= 1;
                top += add_window(&mut r[j..i], &y.d[..ys]);
            }
            while top > 0 || window_cmp(&r[j..i], &y.d[..ys]) != Ordering::Less {
                qd += 1;
                top += sub_window(&mut r[j..i], &y.d[..ys]);
            }
            r[i] = 0;
            q[j] = qd as u32;
        }

        let mut quot = BigInt::from_digits(q);
        let shifted = BigInt::from_digits(r[..ys].to_vec());
        let mut rmd = BigInt::new();
        shifted.r_shift_to(nsh, &mut rmd);
        if self.s != m.s {
            quot = quot.negate();
        }
        if self.s < 0 {
            rmd = rmd.negate();
        }
        Ok((quot, rmd))
    }

    /// `r = self rem m`, with the dividend's sign.
    pub fn div_rem_to(&self, m: &BigInt, r: &mut BigInt) -> Result<(), CryptoError> {
        let (_, rem) = self.div_rem(m)?;
        *r = rem;
        Ok(())
    }

    /// Euclidean remainder for a positive modulus: the result is in `[0, m)`.
    pub fn modulo(&self, m: &BigInt) -> Result<BigInt, CryptoError> {
        let (_, mut r) = self.abs_cow().div_rem(m)?;
        if self.s < 0 && r.signum() > 0 {
            r.update(|v, out| m.sub_to(v, out));
        }
        Ok(r)
    }

    /// Return `self + a`.
    pub fn add(&self, a: &BigInt) -> BigInt {
        let mut r = BigInt::new();
        self.add_to(a, &mut r);
        r
    }

    /// Return `self - a`.
    pub fn subtract(&self, a: &BigInt) -> BigInt {
        let mut r = BigInt::new();
        self.sub_to(a, &mut r);
        r
    }

    /// Return `self * a`.
    pub fn multiply(&self, a: &BigInt) -> BigInt {
        let mut r = BigInt::new();
        self.multiply_to(a, &mut r);
        r
    }

    /// Return `self^2`.
    pub fn square(&self) -> BigInt {
        let mut r = BigInt::new();
        self.square_to(&mut r);
        r
    }

    /// Return `self << n`.
    pub fn shl(&self, n: usize) -> BigInt {
        let mut r = BigInt::new();
        self.l_shift_to(n, &mut r);
        r
    }

    /// Return `self >> n`.
    pub fn shr(&self, n: usize) -> BigInt {
        let mut r = BigInt::new();
        self.r_shift_to(n, &mut r);
        r
    }

    /// Return `-self`.
    pub fn negate(&self) -> BigInt {
        let mut r = BigInt::new();
        BigInt::new().sub_to(self, &mut r);
        r
    }

    /// Return `|self|`.
    pub fn abs(&self) -> BigInt {
        self.abs_cow().into_owned()
    }
}

fn window_cmp(a: &[u32], b: &[u32]) -> Ordering {
    for k in (0..a.len()).rev() {
        match a[k].cmp(&b[k]) {
            Ordering::Equal => continue,
            ord => return ord,
        }
    }
    Ordering::Equal
}

/// `a += b` over equal-length windows; returns the carry out.
fn add_window(a: &mut [u32], b: &[u32]) -> i64 {
    let mut c: i64 = 0;
    for (x, &y) in a.iter_mut().zip(b) {
        let v = *x as i64 + y as i64 + c;
        *x = (v & DM as i64) as u32;
        c = v >> DB;
    }
    c
}

/// `a -= b` over equal-length windows; returns the borrow (0 or -1).
fn sub_window(a: &mut [u32], b: &[u32]) -> i64 {
    let mut c: i64 = 0;
    for (x, &y) in a.iter_mut().zip(b) {
        let v = *x as i64 - y as i64 + c;
        *x = (v & DM as i64) as u32;
        c = v >> DB;
    }
    c
}
