//! RSA private-key signing with the Chinese Remainder Theorem.
//!
//! Only RSASSA-PKCS1-v1_5 with SHA-256 (the JWS `RS256` algorithm) is
//! supported. The public half exposes the raw RSAVP1 primitive for
//! self-checks; there is no signature verification API.

mod pkcs1v15;

pub use pkcs1v15::{padded_digest_info_hex, DIGEST_INFO_SHA256};

use rsalite_bignum::BigInt;
use rsalite_types::{CryptoError, HashAlgId};
use zeroize::Zeroize;

use crate::sha2::Sha256;

/// Parse a hex public exponent into a machine word.
fn parse_exponent(e_hex: &str) -> Result<u64, CryptoError> {
    let digits = e_hex.trim_start_matches('0');
    if e_hex.is_empty() {
        return Err(CryptoError::InvalidKey);
    }
    if digits.is_empty() {
        return Ok(0);
    }
    if digits.len() > 16 {
        return Err(CryptoError::RsaExponentTooLarge);
    }
    u64::from_str_radix(digits, 16).map_err(|_| CryptoError::DecodeHexFail)
}

/// An RSA public key.
#[derive(Clone)]
pub struct RsaPublicKey {
    /// The modulus n.
    n: BigInt,
    /// The public exponent e.
    e: u64,
    /// Key size in bits.
    bits: usize,
    /// Modulus byte length (k).
    k: usize,
}

impl std::fmt::Debug for RsaPublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RsaPublicKey")
            .field("bits", &self.bits)
            .field("e", &self.e)
            .finish()
    }
}

impl RsaPublicKey {
    /// Create an RSA public key from a modulus and exponent.
    pub fn new(n: BigInt, e: u64) -> Result<Self, CryptoError> {
        if n.signum() <= 0 || n.is_even() {
            return Err(CryptoError::InvalidKey);
        }
        if e == 0 || e % 2 == 0 {
            return Err(CryptoError::InvalidKey);
        }
        let bits = n.bit_length();
        Ok(Self {
            n,
            e,
            bits,
            k: bits.div_ceil(8),
        })
    }

    /// Raw RSA public key operation: `s^e mod n` (RSAVP1).
    pub fn raw_public(&self, s: &BigInt) -> Result<BigInt, CryptoError> {
        s.mod_pow_int(self.e, &self.n)
    }

    /// Return the key size in bits.
    pub fn bits(&self) -> usize {
        self.bits
    }

    /// Return the modulus byte length.
    pub fn modulus_len(&self) -> usize {
        self.k
    }

    /// Return the modulus.
    pub fn n(&self) -> &BigInt {
        &self.n
    }

    /// Return the public exponent.
    pub fn e(&self) -> u64 {
        self.e
    }
}

/// An RSA private key with CRT parameters.
///
/// The relations `n = p*q`, `dp = d mod (p-1)`, `dq = d mod (q-1)` and
/// `qinv = q^-1 mod p` are not checked: an inconsistent key yields wrong
/// signatures rather than an error.
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct RsaPrivateKey {
    /// The modulus n.
    n: BigInt,
    /// The public exponent e.
    e: u64,
    /// The private exponent d.
    d: BigInt,
    /// Prime factor p.
    p: BigInt,
    /// Prime factor q.
    q: BigInt,
    /// CRT exponent d mod (p-1).
    dp: BigInt,
    /// CRT exponent d mod (q-1).
    dq: BigInt,
    /// CRT coefficient q^(-1) mod p.
    qinv: BigInt,
    /// Key size in bits.
    #[zeroize(skip)]
    bits: usize,
    /// Modulus byte length (k).
    #[zeroize(skip)]
    k: usize,
}

impl std::fmt::Debug for RsaPrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RsaPrivateKey")
            .field("bits", &self.bits)
            .finish()
    }
}

impl RsaPrivateKey {
    /// Create an RSA private key from its eight components.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        n: BigInt,
        e: u64,
        d: BigInt,
        p: BigInt,
        q: BigInt,
        dp: BigInt,
        dq: BigInt,
        qinv: BigInt,
    ) -> Result<Self, CryptoError> {
        if n.signum() <= 0 || p.signum() <= 0 || q.signum() <= 0 {
            return Err(CryptoError::InvalidKey);
        }
        let bits = n.bit_length();
        Ok(Self {
            n,
            e,
            d,
            p,
            q,
            dp,
            dq,
            qinv,
            bits,
            k: bits.div_ceil(8),
        })
    }

    /// Create an RSA private key from big-endian hex components, in the
    /// PKCS#1 order `n, e, d, p, q, dp, dq, qinv`.
    ///
    /// Leading zero octets are accepted. The public exponent must fit in a
    /// `u64`.
    pub fn from_hex_components(parts: [&str; 8]) -> Result<Self, CryptoError> {
        let [n, e, d, p, q, dp, dq, qinv] = parts;
        if n.is_empty() {
            return Err(CryptoError::InvalidKey);
        }
        Self::new(
            BigInt::from_hex(n),
            parse_exponent(e)?,
            BigInt::from_hex(d),
            BigInt::from_hex(p),
            BigInt::from_hex(q),
            BigInt::from_hex(dp),
            BigInt::from_hex(dq),
            BigInt::from_hex(qinv),
        )
    }

    /// Sign a precomputed `hash` digest with RSASSA-PKCS1-v1_5.
    ///
    /// The signature is exactly [`modulus_len`](Self::modulus_len) bytes.
    pub fn sign_pkcs1v15(&self, hash: HashAlgId, digest: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let em = pkcs1v15::emsa_pkcs1v15_encode(hash, digest, self.k)?;
        let m = BigInt::from_bytes_be(&em);
        let s = self.raw_sign_crt(&m)?;
        s.to_bytes_be_padded(self.k)
    }

    /// Sign a SHA-256 digest with RSASSA-PKCS1-v1_5.
    pub fn sign_pkcs1v15_sha256(&self, digest: &[u8]) -> Result<Vec<u8>, CryptoError> {
        self.sign_pkcs1v15(HashAlgId::Sha256, digest)
    }

    /// Hash `message` with `hash` and sign the digest.
    pub fn sign_message(&self, hash: HashAlgId, message: &[u8]) -> Result<Vec<u8>, CryptoError> {
        match hash {
            HashAlgId::Sha256 => self.sign_pkcs1v15(hash, &Sha256::digest(message)),
        }
    }

    /// Private key operation via CRT (Garner's recombination):
    ///
    /// ```text
    /// xp = (m mod p)^dp mod p
    /// xq = (m mod q)^dq mod q
    /// s  = ((xp - xq) * qinv mod p) * q + xq
    /// ```
    pub fn raw_sign_crt(&self, m: &BigInt) -> Result<BigInt, CryptoError> {
        let mut xp = m.modulo(&self.p)?.mod_pow(&self.dp, &self.p)?;
        let xq = m.modulo(&self.q)?.mod_pow(&self.dq, &self.q)?;
        while xp < xq {
            xp = xp.add(&self.p);
        }
        let h = xp.subtract(&xq).multiply(&self.qinv).modulo(&self.p)?;
        Ok(h.multiply(&self.q).add(&xq))
    }

    /// Private key operation without CRT: `m^d mod n`.
    pub fn raw_sign_direct(&self, m: &BigInt) -> Result<BigInt, CryptoError> {
        m.mod_pow(&self.d, &self.n)
    }

    /// Extract the public key.
    pub fn public_key(&self) -> Result<RsaPublicKey, CryptoError> {
        RsaPublicKey::new(self.n.clone(), self.e)
    }

    /// Return the key size in bits.
    pub fn bits(&self) -> usize {
        self.bits
    }

    /// Return the modulus byte length.
    pub fn modulus_len(&self) -> usize {
        self.k
    }

    /// Return the modulus.
    pub fn n(&self) -> &BigInt {
        &self.n
    }

    /// Return the public exponent.
    pub fn e(&self) -> u64 {
        self.e
    }
}
