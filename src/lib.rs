#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(unused_must_use)]
#![deny(unused_mut)]

//! human-checkphrase derives a short phrase of words from an account address, so that two people
//! can confirm they are looking at the same address by comparing a handful of words instead of a
//! long hex or base58 string.
//!
//! The main defence is against address poisoning: a lookalike address that differs from the real
//! one in a character or two maps to an unrelated phrase, and an attacker who also wants a
//! matching phrase has to pay a full PBKDF2 run for every candidate address.
//!
//! Derivation runs in three steps, each in its own module:
//!
//! 1. kdf: PBKDF2-HMAC-SHA256 of the address, salted and iterated per the protocol parameters.
//! 2. bits: the derived bytes are read as one big-endian integer and cut into 11 bit indices.
//! 3. phrase: each index selects a word from a 2048 word list.
//!
//! ```
//! use human_checkphrase::{derive_checksum, WordList};
//!
//! let words = WordList::bip39_english();
//! let phrase = derive_checksum("1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa", words);
//! assert_eq!(phrase.to_string(), "alarm-banana-secret-border-horror");
//! ```

pub mod bits;
pub mod kdf;
pub mod params;
pub mod phrase;
pub mod vectors;
pub mod wordlist;

pub use params::{ProtocolParams, CHECKSUM_LEN, ITERATIONS, SALT};
pub use phrase::{
    derive_checksum, derive_checksum_from_bytes, derive_checksum_with, parse_checkphrase,
    verify_checkphrase, Checkphrase,
};
pub use vectors::{ConformanceReport, TestVectors};
pub use wordlist::{WordList, WORD_COUNT};
