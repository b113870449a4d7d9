//! PKCS#8 plain RSA private key extraction (RFC 5958, RFC 8017 A.1.2).
//!
//! The key is located positionally, without decoding the DER into a tree:
//!
//! ```text
//! PrivateKeyInfo ::= SEQUENCE {              -- root
//!     version                   INTEGER,     -- [0]
//!     privateKeyAlgorithm       SEQUENCE,    -- [1]
//!     privateKey                OCTET STRING -- [2]
//!         RSAPrivateKey ::= SEQUENCE {       -- [2,0]
//!             version INTEGER,               -- [2,0,0]
//!             n, e, d, p, q, dp, dq, qinv    -- [2,0,1] .. [2,0,8]
//!         }
//! }
//! ```
//!
//! Neither the version nor the algorithm identifier is checked.

use rsalite_crypto::rsa::RsaPrivateKey;
use rsalite_types::PkiError;
use rsalite_utils::asn1::{self, tags};
use zeroize::Zeroize;

/// PEM label of an unencrypted PKCS#8 key.
pub const PRIVATE_KEY_LABEL: &str = "PRIVATE KEY";

/// Child paths of the eight RSA components, in PKCS#1 order.
const FIELD_PATHS: [[usize; 3]; 8] = [
    [2, 0, 1],
    [2, 0, 2],
    [2, 0, 3],
    [2, 0, 4],
    [2, 0, 5],
    [2, 0, 6],
    [2, 0, 7],
    [2, 0, 8],
];

const FIELD_NAMES: [&str; 8] = ["n", "e", "d", "p", "q", "dp", "dq", "qinv"];

/// The eight RSA components as the lowercase hex of their DER INTEGER
/// contents, including any leading `00` sign octet.
#[derive(Clone, PartialEq, Eq, Zeroize)]
#[zeroize(drop)]
pub struct RsaKeyFields {
    pub n: String,
    pub e: String,
    pub d: String,
    pub p: String,
    pub q: String,
    pub dp: String,
    pub dq: String,
    pub qinv: String,
}

impl std::fmt::Debug for RsaKeyFields {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RsaKeyFields")
            .field("n", &self.n)
            .field("e", &self.e)
            .finish_non_exhaustive()
    }
}

impl RsaKeyFields {
    /// Components in PKCS#1 order, paired with their names.
    pub fn named(&self) -> [(&'static str, &str); 8] {
        let parts = self.as_array();
        std::array::from_fn(|i| (FIELD_NAMES[i], parts[i]))
    }

    fn as_array(&self) -> [&str; 8] {
        [
            &self.n, &self.e, &self.d, &self.p, &self.q, &self.dp, &self.dq, &self.qinv,
        ]
    }

    /// Build the signing key.
    pub fn to_private_key(&self) -> Result<RsaPrivateKey, PkiError> {
        Ok(RsaPrivateKey::from_hex_components(self.as_array())?)
    }
}

/// Extract the RSA components from hex PKCS#8 DER.
pub fn extract_rsa_fields(der_hex: &str) -> Result<RsaKeyFields, PkiError> {
    if !asn1::is_valid_der(der_hex) {
        return Err(PkiError::NotAsn1Hex);
    }

    let mut values: Vec<String> = Vec::with_capacity(FIELD_PATHS.len());
    for (path, name) in FIELD_PATHS.iter().zip(FIELD_NAMES) {
        let value = asn1::value_by_path(der_hex, 0, path, tags::INTEGER)
            .map_err(|e| PkiError::MalformedPrivateKey(format!("field {name}: {e}")))?;
        values.push(value.to_ascii_lowercase());
    }

    let [n, e, d, p, q, dp, dq, qinv]: [String; 8] = values
        .try_into()
        .map_err(|_| PkiError::MalformedPrivateKey("missing field".into()))?;
    Ok(RsaKeyFields {
        n,
        e,
        d,
        p,
        q,
        dp,
        dq,
        qinv,
    })
}

/// Parse hex PKCS#8 DER into an RSA private key.
pub fn parse_pkcs8_der_hex(der_hex: &str) -> Result<RsaPrivateKey, PkiError> {
    let key = extract_rsa_fields(der_hex)?.to_private_key()?;
    log::debug!("pkcs8: loaded {}-bit RSA private key", key.bits());
    Ok(key)
}

/// Parse DER bytes of a PKCS#8 PrivateKeyInfo into an RSA private key.
pub fn parse_pkcs8_der(der: &[u8]) -> Result<RsaPrivateKey, PkiError> {
    let mut der_hex = hex::encode(der);
    let key = parse_pkcs8_der_hex(&der_hex);
    der_hex.zeroize();
    key
}

/// Parse a PEM-armored ("PRIVATE KEY") PKCS#8 RSA private key.
pub fn parse_pkcs8_pem(pem: &str) -> Result<RsaPrivateKey, PkiError> {
    let mut der_hex = rsalite_utils::pem::to_hex(pem, PRIVATE_KEY_LABEL)?;
    let key = parse_pkcs8_der_hex(&der_hex);
    der_hex.zeroize();
    key
}

/// Extract the RSA components of a PEM-armored PKCS#8 key.
pub fn pem_rsa_fields(pem: &str) -> Result<RsaKeyFields, PkiError> {
    let mut der_hex = rsalite_utils::pem::to_hex(pem, PRIVATE_KEY_LABEL)?;
    let fields = extract_rsa_fields(&der_hex);
    der_hex.zeroize();
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use rsalite_types::CryptoError;

    const PEM_1024: &str = include_str!("../../../../testdata/rsa1024_pkcs8.pem");
    const PEM_2048: &str = include_str!("../../../../testdata/rsa2048_pkcs8.pem");

    // SEQUENCE { INTEGER 0, SEQUENCE { OID rsaEncryption, NULL },
    //   OCTET STRING { SEQUENCE { INTEGER 0, INTEGER 0x00c5, INTEGER 65537 } } }
    const TRUNCATED_P8: &str =
        "3022020100300d06092a864886f70d0101010500040e300c020100020200c50203010001";

    #[test]
    fn test_extract_rsa1024_fields() {
        let f = pem_rsa_fields(PEM_1024).unwrap();
        assert_eq!(
            f.n,
            "00dd80351cd38b0c28a44e61c90d7e763c1aff59d592cb68420b928c8113056bca8cb97f8b9ed95faeaf8d2479ac7d0a98147bb2aee2fc2dcad4ca627f71c4c8a96171f6d9c5dbd614ac724c0fd68e9c36a3ca4ecfc28a2e855af267502c1b2900801359fc9ef20fe50a3c16dda2ea47a48ba38f9eac0273df75e5ecfbfc82b575"
        );
        assert_eq!(f.e, "010001");
        assert_eq!(
            f.d,
            "00ce1f6fcd9a826bd72a4792b1e12fcce154124a4bf865f768769272d3ee9a7ddba8a73aacf82ebadeb998f3d7928f6e1b65fc52a472b05000cf9262a4cc7f5e669e0770d0372867aec1bc38c57abf76da893adcb45bbe8532f8db65d2abddd8ccc1ef9791e498c97b08e9132be1e3879dfe5f335725043a83a186880bfddeb221"
        );
        assert_eq!(
            f.p,
            "00ef4fc83fdfddd389794e2da2be9dae70136ffcb052d49e58940c9c07ea16a14ed761aed6d3cf750c13c89b9d5f3e2dc04d0762fce6e14a6fb0430cb21f7b1309"
        );
        assert_eq!(
            f.q,
            "00ecf276d5ce9122022669fc6d3cfe6469b0f774620011e8224636c69c2a52fd3538c46f183149169a34ea55184a4a49426d30afec6a2c8d4d7c585db4f7464e0d"
        );
        assert_eq!(
            f.dp,
            "00b42ae09c1632af5bc493f30f9f6a9f3589acba151587355f82b6ab91d9cf07ca8fa4df38a5667ebc84f8770fd7f0bc0916f504b55a2d2b19431e77a472c6f9e1"
        );
        assert_eq!(
            f.dq,
            "008dd0303f96fa561863555bb725a23c06e5dbb4d452a66500de753a398d3b4e40e450ed0cd5b2a0cc7a8f258efc27a9e10fe8ebe1db49fee8395bc9f9dd653ea1"
        );
        assert_eq!(
            f.qinv,
            "009cd0feb819964c0aae1f4cdf1c692a99de94f652cf168e816d2f285be117d51be2d4a0355d2fbeeac4b789a5ba33a39784ccf15107db1a7742f07eb133d2de1e"
        );
        let named = f.named();
        assert_eq!(named[1], ("e", "010001"));
        assert_eq!(named[7].0, "qinv");
    }

    #[test]
    fn test_parse_pem_key_sizes() {
        let k1 = parse_pkcs8_pem(PEM_1024).unwrap();
        assert_eq!(k1.bits(), 1024);
        assert_eq!(k1.modulus_len(), 128);
        assert_eq!(k1.e(), 65537);

        let k2 = parse_pkcs8_pem(PEM_2048).unwrap();
        assert_eq!(k2.bits(), 2048);
        assert_eq!(k2.modulus_len(), 256);
    }

    #[test]
    fn test_der_and_hex_entry_points_agree() {
        let der = rsalite_utils::pem::to_der(PEM_1024, PRIVATE_KEY_LABEL).unwrap();
        let from_der = parse_pkcs8_der(&der).unwrap();
        let from_hex = parse_pkcs8_der_hex(&hex::encode(&der)).unwrap();
        assert_eq!(from_der.n(), from_hex.n());
        assert_eq!(
            extract_rsa_fields(&hex::encode(&der)).unwrap(),
            pem_rsa_fields(PEM_1024).unwrap()
        );
    }

    #[test]
    fn test_uppercase_hex_is_accepted() {
        let der = rsalite_utils::pem::to_der(PEM_1024, PRIVATE_KEY_LABEL).unwrap();
        let upper = hex::encode(&der).to_ascii_uppercase();
        assert_eq!(extract_rsa_fields(&upper).unwrap().e, "010001");
    }

    #[test]
    fn test_missing_header() {
        assert!(matches!(
            parse_pkcs8_pem("MIICdgIBADANBgkqhkiG9w0BAQEFAASC"),
            Err(PkiError::PemNoHeader)
        ));
    }

    #[test]
    fn test_not_der() {
        assert!(matches!(extract_rsa_fields("30"), Err(PkiError::NotAsn1Hex)));
        assert!(matches!(
            extract_rsa_fields("3003020100ff"),
            Err(PkiError::NotAsn1Hex)
        ));
    }

    #[test]
    fn test_truncated_key_is_malformed() {
        // Valid DER, but the inner sequence ends after e.
        match extract_rsa_fields(TRUNCATED_P8) {
            Err(PkiError::MalformedPrivateKey(msg)) => {
                assert!(msg.starts_with("field d:"), "{msg}");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_wrong_tag_is_malformed() {
        // The modulus is an OCTET STRING instead of an INTEGER.
        let bad = TRUNCATED_P8.replacen("020200c5", "040200c5", 1);
        match extract_rsa_fields(&bad) {
            Err(PkiError::MalformedPrivateKey(msg)) => {
                assert_eq!(
                    msg,
                    format!(
                        "field n: {}",
                        CryptoError::Asn1TagMismatch {
                            expected: 0x02,
                            found: 0x04
                        }
                    )
                );
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_debug_hides_private_fields() {
        let f = pem_rsa_fields(PEM_1024).unwrap();
        let dbg = format!("{f:?}");
        assert!(dbg.contains("010001"));
        assert!(!dbg.contains(&f.d));
    }
}
