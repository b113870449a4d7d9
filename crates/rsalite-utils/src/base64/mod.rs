//! Base64 and Base64url encoding and decoding.

use rsalite_types::CryptoError;

const STANDARD: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";
const URL_SAFE: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

fn encode_with(input: &[u8], table: &[u8; 64], pad: bool) -> String {
    let mut output = String::with_capacity(input.len().div_ceil(3) * 4);

    for chunk in input.chunks(3) {
        let b0 = chunk[0] as u32;
        let b1 = if chunk.len() > 1 { chunk[1] as u32 } else { 0 };
        let b2 = if chunk.len() > 2 { chunk[2] as u32 } else { 0 };

        let triple = (b0 << 16) | (b1 << 8) | b2;

        output.push(table[((triple >> 18) & 0x3F) as usize] as char);
        output.push(table[((triple >> 12) & 0x3F) as usize] as char);

        if chunk.len() > 1 {
            output.push(table[((triple >> 6) & 0x3F) as usize] as char);
        } else if pad {
            output.push('=');
        }

        if chunk.len() > 2 {
            output.push(table[(triple & 0x3F) as usize] as char);
        } else if pad {
            output.push('=');
        }
    }

    output
}

/// Encode bytes to a padded standard Base64 string.
pub fn encode(input: &[u8]) -> String {
    encode_with(input, STANDARD, true)
}

/// Encode bytes to unpadded Base64url (RFC 4648 section 5), as used by JWS.
pub fn encode_url_safe_no_pad(input: &[u8]) -> String {
    encode_with(input, URL_SAFE, false)
}

/// Rewrite standard Base64 text as Base64url: `+` to `-`, `/` to `_`,
/// padding dropped.
pub fn to_url_safe(b64: &str) -> String {
    b64.chars()
        .filter(|&c| c != '=')
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            c => c,
        })
        .collect()
}

/// Decode a padded standard Base64 string to bytes. ASCII whitespace is
/// ignored.
pub fn decode(input: &str) -> Result<Vec<u8>, CryptoError> {
    let filtered: Vec<u8> = input
        .bytes()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();

    if filtered.is_empty() {
        return Ok(Vec::new());
    }

    if filtered.len() % 4 != 0 {
        return Err(CryptoError::DecodeBase64Fail);
    }

    let mut output = Vec::with_capacity((filtered.len() / 4) * 3);
    let last = filtered.len() / 4 - 1;

    for (n, chunk) in filtered.chunks(4).enumerate() {
        let a = decode_char(chunk[0])?;
        let b = decode_char(chunk[1])?;

        // Padding may only appear in the final quantum.
        if (chunk[2] == b'=' || chunk[3] == b'=') && n != last {
            return Err(CryptoError::DecodeBase64Fail);
        }

        if chunk[2] == b'=' {
            if chunk[3] != b'=' {
                return Err(CryptoError::DecodeBase64Fail);
            }
            let val = (a << 18) | (b << 12);
            output.push((val >> 16) as u8);
            continue;
        }
        let c = decode_char(chunk[2])?;
        if chunk[3] == b'=' {
            let val = (a << 18) | (b << 12) | (c << 6);
            output.push((val >> 16) as u8);
            output.push((val >> 8) as u8);
            continue;
        }
        let d = decode_char(chunk[3])?;
        let triple = (a << 18) | (b << 12) | (c << 6) | d;

        output.push((triple >> 16) as u8);
        output.push((triple >> 8) as u8);
        output.push(triple as u8);
    }

    Ok(output)
}

fn decode_char(c: u8) -> Result<u32, CryptoError> {
    match c {
        b'A'..=b'Z' => Ok((c - b'A') as u32),
        b'a'..=b'z' => Ok((c - b'a' + 26) as u32),
        b'0'..=b'9' => Ok((c - b'0' + 52) as u32),
        b'+' => Ok(62),
        b'/' => Ok(63),
        _ => Err(CryptoError::DecodeBase64Fail),
    }
}
