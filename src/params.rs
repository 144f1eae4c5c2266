#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(unused_must_use)]
#![deny(unused_mut)]

//! params holds the protocol parameters that every implementation must agree on. Changing any of
//! them changes every derived phrase, so a new set of values is a new protocol version rather than
//! a configuration tweak.

use anyhow::{bail, Result};

/// SALT is the PBKDF2 salt used by protocol version 1.
pub const SALT: &str = "human-readable-checksum";

/// ITERATIONS is the PBKDF2 round count used by protocol version 1. The count is deliberately
/// high: anyone searching for a lookalike address with a matching phrase pays one full key
/// derivation per candidate.
pub const ITERATIONS: u32 = 40_000;

/// CHECKSUM_LEN is the number of words in a protocol version 1 checkphrase.
pub const CHECKSUM_LEN: usize = 5;

/// WORD_BITS is the number of bits needed to address one of the 2048 words in a word list.
pub const WORD_BITS: usize = 11;

/// MAX_KEY_BYTES is the largest derived key that fits in the 128 bit integer used for bit
/// extraction.
pub const MAX_KEY_BYTES: usize = 16;

/// MAX_CHECKSUM_LEN is the longest checkphrase whose bits fit in MAX_KEY_BYTES.
pub const MAX_CHECKSUM_LEN: usize = MAX_KEY_BYTES * 8 / WORD_BITS;

/// ProtocolParams is the immutable record of constants that determine the derivation. Values can
/// only be built through ProtocolParams::new, which rejects anything the derivation cannot honor,
/// or taken from ProtocolParams::V1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProtocolParams {
    salt: &'static str,
    iterations: u32,
    checksum_len: usize,
}

impl ProtocolParams {
    /// V1 is the deployed protocol: salt "human-readable-checksum", 40,000 iterations, 5 words.
    pub const V1: ProtocolParams = ProtocolParams {
        salt: SALT,
        iterations: ITERATIONS,
        checksum_len: CHECKSUM_LEN,
    };

    /// new validates and builds a parameter record.
    pub fn new(salt: &'static str, iterations: u32, checksum_len: usize) -> Result<ProtocolParams> {
        if iterations == 0 {
            bail!("iterations must be at least 1");
        }
        if checksum_len == 0 || checksum_len > MAX_CHECKSUM_LEN {
            bail!(
                "checksum length must be between 1 and {} words, got {}",
                MAX_CHECKSUM_LEN,
                checksum_len
            );
        }
        Ok(ProtocolParams {
            salt,
            iterations,
            checksum_len,
        })
    }

    /// salt returns the PBKDF2 salt.
    pub fn salt(&self) -> &'static str {
        self.salt
    }

    /// iterations returns the PBKDF2 round count.
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// checksum_len returns the number of words in a derived checkphrase.
    pub fn checksum_len(&self) -> usize {
        self.checksum_len
    }

    /// key_byte_len is the number of derived key bytes needed to cover checksum_len * 11 bits,
    /// rounded up to a whole byte.
    pub fn key_byte_len(&self) -> usize {
        (self.checksum_len * WORD_BITS).div_ceil(8)
    }

    /// excess_bits is the number of low order key bits left over once the key has been cut into
    /// 11 bit groups. They are shifted away before extraction.
    pub fn excess_bits(&self) -> usize {
        (8 * self.key_byte_len()) % WORD_BITS
    }
}

impl Default for ProtocolParams {
    fn default() -> Self {
        ProtocolParams::V1
    }
}
