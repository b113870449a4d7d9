//! PEM armor removal.

use rsalite_types::PkiError;

const BEGIN_PREFIX: &str = "-----BEGIN ";
const END_PREFIX: &str = "-----END ";
const DASHES_SUFFIX: &str = "-----";

/// Return the Base64 body enclosed by the `label` armor lines, with all
/// ASCII whitespace removed.
///
/// Everything up to the last `BEGIN label` line and from the first
/// `END label` line on is discarded. A missing END line is tolerated.
pub fn strip_armor(input: &str, label: &str) -> Result<String, PkiError> {
    if !input.contains(BEGIN_PREFIX) {
        return Err(PkiError::PemNoHeader);
    }
    let begin = format!("{BEGIN_PREFIX}{label}{DASHES_SUFFIX}");
    let end = format!("{END_PREFIX}{label}{DASHES_SUFFIX}");

    let body = match input.rfind(&begin) {
        Some(pos) => &input[pos + begin.len()..],
        None => input,
    };
    let body = match body.find(&end) {
        Some(pos) => &body[..pos],
        None => body,
    };
    Ok(body.chars().filter(|c| !c.is_ascii_whitespace()).collect())
}

/// Decode the DER bytes of a `label` PEM block.
pub fn to_der(input: &str, label: &str) -> Result<Vec<u8>, PkiError> {
    let der = crate::base64::decode(&strip_armor(input, label)?)?;
    log::debug!("pem: decoded {} byte {} block", der.len(), label);
    Ok(der)
}

/// Decode a `label` PEM block to lowercase hex DER.
pub fn to_hex(input: &str, label: &str) -> Result<String, PkiError> {
    Ok(hex::encode(to_der(input, label)?))
}
