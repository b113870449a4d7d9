//! Key display command implementation.

use std::fmt::Write;
use std::fs;

use rsalite_pki::pkcs8::{self, RsaKeyFields};

pub fn run(input: &str, text: bool) -> Result<(), Box<dyn std::error::Error>> {
    let pem = fs::read_to_string(input)?;
    let fields = pkcs8::pem_rsa_fields(&pem)?;
    let key = fields.to_private_key()?;
    print!("{}", describe(key.bits(), &fields, text));
    Ok(())
}

fn describe(bits: usize, fields: &RsaKeyFields, text: bool) -> String {
    let mut out = format!("RSA Private-Key: ({bits} bit)\n");
    if text {
        for (name, value) in fields.named() {
            let _ = writeln!(out, "{name}:");
            for chunk in value.as_bytes().chunks(64) {
                let _ = writeln!(out, "    {}", String::from_utf8_lossy(chunk));
            }
        }
    }
    out
}
