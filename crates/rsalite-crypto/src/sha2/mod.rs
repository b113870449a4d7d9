//! SHA-256 as defined in FIPS 180-4.

use ::sha2::Digest as _;

/// SHA-256 output size in bytes.
pub const SHA256_OUTPUT_SIZE: usize = 32;

/// SHA-256 hash context.
#[derive(Clone, Default)]
pub struct Sha256 {
    inner: ::sha2::Sha256,
}

impl Sha256 {
    /// Create a new SHA-256 hash context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed data into the hash computation.
    pub fn update(&mut self, data: &[u8]) {
        self.inner.update(data);
    }

    /// Finalize the hash and return the 32-byte digest.
    pub fn finish(self) -> [u8; SHA256_OUTPUT_SIZE] {
        self.inner.finalize().into()
    }

    /// One-shot: compute the SHA-256 digest of `data`.
    pub fn digest(data: &[u8]) -> [u8; SHA256_OUTPUT_SIZE] {
        let mut ctx = Self::new();
        ctx.update(data);
        ctx.finish()
    }

    /// One-shot digest rendered as lowercase hex.
    pub fn hex_digest(data: &[u8]) -> String {
        hex::encode(Self::digest(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_empty() {
        assert_eq!(
            Sha256::hex_digest(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_sha256_abc_incremental() {
        let mut ctx = Sha256::new();
        ctx.update(b"a");
        ctx.update(b"bc");
        assert_eq!(
            hex::encode(ctx.finish()),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_sha256_jws_signing_input() {
        let input = "eyJhbGciOiJSUzI1NiIsInR5cCI6IkpXVCJ9.\
                     eyJzdWIiOiIxMjM0NTY3ODkwIiwibmFtZSI6IkpvaG4gRG9lIiwiYWRtaW4iOnRydWUsImlhdCI6MTUxNjIzOTAyMn0";
        assert_eq!(
            Sha256::hex_digest(input.as_bytes()),
            "8041fb8cba9e4f8cc1483790b05262841f27fdcb211bc039ddf8864374db5f53"
        );
    }
}
