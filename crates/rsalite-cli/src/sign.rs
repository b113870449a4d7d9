//! JWT signing command implementation.

use std::fs;

use rsalite_auth::jwt::{JwtSigner, RS256_HEADER};

/// Where a JSON segment comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source<'a> {
    Inline(&'a str),
    File(&'a str),
    Default,
}

impl<'a> Source<'a> {
    /// Inline text wins over a file; neither means the default.
    pub fn pick(inline: Option<&'a str>, file: Option<&'a str>) -> Self {
        match (inline, file) {
            (Some(text), _) => Source::Inline(text),
            (None, Some(path)) => Source::File(path),
            (None, None) => Source::Default,
        }
    }

    fn load(self, default: &str) -> Result<String, Box<dyn std::error::Error>> {
        Ok(match self {
            Source::Inline(text) => text.to_string(),
            Source::File(path) => {
                let raw = crate::dgst::read_input(path)?;
                String::from_utf8(raw)?.trim_end_matches(['\r', '\n']).to_string()
            }
            Source::Default => default.to_string(),
        })
    }
}

pub fn run(
    key_file: &str,
    header: Source<'_>,
    payload: Source<'_>,
) -> Result<(), Box<dyn std::error::Error>> {
    let pem = fs::read_to_string(key_file)?;
    let signer = JwtSigner::from_pem(&pem)?;
    log::debug!("sign: {}-bit key from {key_file}", signer.key().bits());

    let header = header.load(RS256_HEADER)?;
    let payload = match payload {
        Source::Default => return Err("no payload given".into()),
        p => p.load("")?,
    };
    println!("{}", signer.sign(&header, &payload)?);
    Ok(())
}
