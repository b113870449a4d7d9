//! SHA-256 digest command implementation.

use std::fs;
use std::io::{self, Read};

use rsalite_crypto::sha2::Sha256;

pub fn run(file: &str) -> Result<(), Box<dyn std::error::Error>> {
    let data = read_input(file)?;
    log::debug!("dgst: {} bytes from {file}", data.len());
    println!("{}", format_line(file, &data));
    Ok(())
}

/// Read a file, or stdin for `-`.
pub(crate) fn read_input(file: &str) -> io::Result<Vec<u8>> {
    if file == "-" {
        let mut buf = Vec::new();
        io::stdin().read_to_end(&mut buf)?;
        Ok(buf)
    } else {
        fs::read(file)
    }
}

fn format_line(file: &str, data: &[u8]) -> String {
    let hex = Sha256::hex_digest(data);
    if file == "-" {
        format!("SHA256(stdin)= {hex}")
    } else {
        format!("SHA256({file})= {hex}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_line() {
        assert_eq!(
            format_line("-", b""),
            "SHA256(stdin)= e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(
            format_line("msg.txt", b"abc"),
            "SHA256(msg.txt)= ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_read_input_missing_file() {
        assert!(read_input("/nonexistent/rsalite/input").is_err());
    }
}
