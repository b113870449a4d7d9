//! ASN.1 DER access over hex strings.
//!
//! The DER blob is never decoded into a tree: every lookup re-scans the hex
//! text from a starting offset. Offsets count hex characters, so DER byte
//! `n` starts at offset `2 * n`.

mod locator;

pub use locator::{
    child_indices, index_by_path, is_valid_der, tag_at, tag_length_len, tlv_len, value_by_path,
    value_hex, value_index, value_len,
};

/// ASN.1 tag constants.
pub mod tags {
    pub const INTEGER: u8 = 0x02;
    pub const BIT_STRING: u8 = 0x03;
    pub const OCTET_STRING: u8 = 0x04;
    pub const NULL: u8 = 0x05;
    pub const OID: u8 = 0x06;
    pub const SEQUENCE: u8 = 0x30;
}
