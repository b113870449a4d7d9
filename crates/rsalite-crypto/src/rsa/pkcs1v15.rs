//! EMSA-PKCS1-v1_5 encoding for signatures (RFC 8017 section 9.2).

use rsalite_types::{CryptoError, HashAlgId};

/// DigestInfo DER prefix for SHA-256 (OID 2.16.840.1.101.3.4.2.1).
pub const DIGEST_INFO_SHA256: &[u8] = &[
    0x30, 0x31, 0x30, 0x0d, 0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02, 0x01, 0x05,
    0x00, 0x04, 0x20,
];

/// Minimum number of `0xFF` padding octets.
const MIN_PS_LEN: usize = 8;

fn digest_info_prefix(hash: HashAlgId) -> &'static [u8] {
    match hash {
        HashAlgId::Sha256 => DIGEST_INFO_SHA256,
    }
}

/// `EM = 00 || 01 || FF..FF || 00 || DigestInfo(hash) || digest`, `|EM| == k`.
pub(crate) fn emsa_pkcs1v15_encode(
    hash: HashAlgId,
    digest: &[u8],
    k: usize,
) -> Result<Vec<u8>, CryptoError> {
    if digest.len() != hash.output_size() {
        return Err(CryptoError::InvalidArg);
    }
    let prefix = digest_info_prefix(hash);
    let ps_len = k
        .checked_sub(3 + prefix.len() + digest.len())
        .filter(|n| *n >= MIN_PS_LEN)
        .ok_or(CryptoError::RsaInvalidPadding)?;

    let mut em = vec![0xFF; k];
    em[0] = 0x00;
    em[1] = 0x01;
    let t = 3 + ps_len;
    em[t - 1] = 0x00;
    em[t..t + prefix.len()].copy_from_slice(prefix);
    em[t + prefix.len()..].copy_from_slice(digest);
    Ok(em)
}

/// Padded DigestInfo for a hex SHA-256 digest and a modulus of `key_bits`
/// bits, as lowercase hex of exactly `2 * ceil(key_bits / 8)` characters.
pub fn padded_digest_info_hex(digest_hex: &str, key_bits: usize) -> Result<String, CryptoError> {
    let digest = hex::decode(digest_hex).map_err(|_| CryptoError::DecodeHexFail)?;
    let em = emsa_pkcs1v15_encode(HashAlgId::Sha256, &digest, key_bits.div_ceil(8))?;
    Ok(hex::encode(em))
}
