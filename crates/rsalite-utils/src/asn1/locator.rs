//! TLV walking primitives.

use rsalite_bignum::BigInt;
use rsalite_types::CryptoError;

use super::tags;

fn slice(s: &str, from: usize, len: usize) -> Result<&str, CryptoError> {
    s.get(from..from + len).ok_or(CryptoError::DecodeAsn1Fail)
}

fn octet_at(s: &str, idx: usize) -> Result<u8, CryptoError> {
    let h = slice(s, idx, 2)?;
    if !h.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(CryptoError::DecodeHexFail);
    }
    u8::from_str_radix(h, 16).map_err(|_| CryptoError::DecodeHexFail)
}

/// Tag octet of the TLV at `idx`.
pub fn tag_at(s: &str, idx: usize) -> Result<u8, CryptoError> {
    octet_at(s, idx)
}

/// Number of length octets of the TLV at `idx`, counting the `8n` prefix
/// octet of the long form.
///
/// Indefinite lengths (`80`) and long forms wider than four octets are
/// rejected.
pub fn tag_length_len(s: &str, idx: usize) -> Result<usize, CryptoError> {
    match octet_at(s, idx + 2)? {
        l if l < 0x80 => Ok(1),
        0x80 => Err(CryptoError::Asn1IndefiniteLength),
        l => {
            let n = (l & 0x7f) as usize;
            if n <= 4 {
                Ok(n + 1)
            } else {
                Err(CryptoError::DecodeAsn1Fail)
            }
        }
    }
}

/// Length in bytes of the value of the TLV at `idx`.
pub fn value_len(s: &str, idx: usize) -> Result<usize, CryptoError> {
    let lblen = tag_length_len(s, idx)?;
    let hl = slice(s, idx + 2, lblen * 2)?;
    let digits = if lblen > 1 { &hl[2..] } else { hl };
    if !digits.bytes().all(|c| c.is_ascii_hexdigit()) {
        return Err(CryptoError::DecodeHexFail);
    }
    let v = BigInt::from_hex(digits).int_value();
    usize::try_from(v).map_err(|_| CryptoError::DecodeAsn1Fail)
}

/// Offset of the value of the TLV at `idx`.
pub fn value_index(s: &str, idx: usize) -> Result<usize, CryptoError> {
    Ok(idx + (tag_length_len(s, idx)? + 1) * 2)
}

/// Total hex length of the TLV at `idx`.
pub fn tlv_len(s: &str, idx: usize) -> Result<usize, CryptoError> {
    Ok(2 + tag_length_len(s, idx)? * 2 + value_len(s, idx)? * 2)
}

/// Hex of the value of the TLV at `idx`.
pub fn value_hex(s: &str, idx: usize) -> Result<&str, CryptoError> {
    slice(s, value_index(s, idx)?, value_len(s, idx)? * 2)
}

/// Offsets of the immediate children of the constructed TLV at `idx`.
///
/// A BIT STRING's unused-bits octet is skipped before its content is read
/// as TLVs. A trailing child that would overrun its parent is dropped.
pub fn child_indices(s: &str, idx: usize) -> Result<Vec<usize>, CryptoError> {
    let mut start = value_index(s, idx)?;
    let mut total = value_len(s, idx)? * 2;
    if tag_at(s, idx)? == tags::BIT_STRING {
        start += 2;
        total = total.checked_sub(2).ok_or(CryptoError::DecodeAsn1Fail)?;
    }

    let mut children = Vec::new();
    let mut consumed = 0;
    let mut i = start;
    while consumed < total {
        let len = tlv_len(s, i)?;
        consumed += len;
        if consumed > total {
            break;
        }
        children.push(i);
        i += len;
    }
    Ok(children)
}

/// Descend from `root` through the 0-based child positions in `path` and
/// check the final TLV carries `expected_tag`. Returns its offset.
pub fn index_by_path(
    s: &str,
    root: usize,
    path: &[usize],
    expected_tag: u8,
) -> Result<usize, CryptoError> {
    let mut idx = root;
    for &nth in path {
        let children = child_indices(s, idx)?;
        idx = *children.get(nth).ok_or(CryptoError::Asn1PathNotFound)?;
    }
    let found = tag_at(s, idx)?;
    if found != expected_tag {
        return Err(CryptoError::Asn1TagMismatch {
            expected: expected_tag,
            found,
        });
    }
    Ok(idx)
}

/// Value hex of the TLV reached by [`index_by_path`].
pub fn value_by_path<'a>(
    s: &'a str,
    root: usize,
    path: &[usize],
    expected_tag: u8,
) -> Result<&'a str, CryptoError> {
    let idx = index_by_path(s, root, path, expected_tag)?;
    value_hex(s, idx)
}

/// Whether `s` is one even-length DER TLV whose declared length covers
/// exactly the rest of the string.
pub fn is_valid_der(s: &str) -> bool {
    if s.len() % 2 == 1 {
        return false;
    }
    let (Ok(lblen), Ok(vlen)) = (tag_length_len(s, 0), value_len(s, 0)) else {
        return false;
    };
    s.len().checked_sub(2 + lblen * 2) == Some(vlen * 2)
}
