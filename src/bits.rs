#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(unused_must_use)]
#![deny(unused_mut)]

//! bits cuts a derived key into 11 bit word indices.
//!
//! The key is read as one big-endian unsigned integer. The bits that do not make up a whole word
//! sit at the low end of the integer and are shifted away, then the remaining bits are read off
//! most significant group first. Any deviation here (rounding the key length down, taking the
//! excess from the high end, reading groups in the other order) changes every phrase and breaks
//! agreement with other implementations.

use crate::kdf::DerivedKey;
use crate::params::{ProtocolParams, MAX_KEY_BYTES, WORD_BITS};

/// WORD_INDEX_MASK selects the low 11 bits of an integer.
pub const WORD_INDEX_MASK: u128 = (1 << WORD_BITS) - 1;

/// extract_indices converts a derived key into params.checksum_len() word indices, each in the
/// range 0..=2047. The key must come from derive_key with the same params.
pub fn extract_indices(key: &DerivedKey, params: &ProtocolParams) -> Vec<u16> {
    let bytes = key.as_bytes();
    debug_assert_eq!(bytes.len(), params.key_byte_len());

    // Right-align the key so the u128 holds exactly its value.
    let mut buf = [0u8; MAX_KEY_BYTES];
    buf[MAX_KEY_BYTES - bytes.len()..].copy_from_slice(bytes);
    let key_int = u128::from_be_bytes(buf) >> params.excess_bits();

    let words = params.checksum_len();
    (0..words)
        .map(|i| {
            let shift = (words - 1 - i) * WORD_BITS;
            ((key_int >> shift) & WORD_INDEX_MASK) as u16
        })
        .collect()
}
