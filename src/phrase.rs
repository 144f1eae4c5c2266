#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(unused_must_use)]
#![deny(unused_mut)]

//! phrase turns addresses into checkphrases, and checks phrases that a human has read back.
//!
//! The derivation is a pure function of the address, the word list, and the protocol parameters.
//! It holds no state between calls and can run on any number of threads at once, but each call
//! performs a full PBKDF2 run and blocks for tens of milliseconds. Keep it off latency sensitive
//! paths.

use std::fmt;

use anyhow::{bail, Context, Error, Result};
use tracing::trace;

use crate::bits::extract_indices;
use crate::kdf::derive_key;
use crate::params::ProtocolParams;
use crate::wordlist::{WordList, PHRASE_SEPARATOR};

/// Checkphrase is the ordered list of words derived from an address. Two checkphrases are equal
/// only if they hold the same words in the same order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Checkphrase {
    words: Vec<String>,
}

impl Checkphrase {
    /// words returns the words of the phrase in order.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// len returns the number of words in the phrase.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// is_empty reports whether the phrase has no words. Derived phrases always have at least one.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// shares_words_with reports whether any word appears in both phrases, regardless of position.
    pub fn shares_words_with(&self, other: &Checkphrase) -> bool {
        self.words.iter().any(|w| other.words.contains(w))
    }

    /// into_words consumes the phrase and returns its words.
    pub fn into_words(self) -> Vec<String> {
        self.words
    }
}

impl fmt::Display for Checkphrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, word) in self.words.iter().enumerate() {
            if i != 0 {
                write!(f, "{}", PHRASE_SEPARATOR)?;
            }
            f.write_str(word)?;
        }
        Ok(())
    }
}

/// build_phrase maps word indices to words, preserving their order.
pub fn build_phrase(indices: &[u16], word_list: &WordList) -> Checkphrase {
    Checkphrase {
        words: indices
            .iter()
            .map(|&i| word_list.word(i).to_string())
            .collect(),
    }
}

/// derive_checksum computes the protocol v1 checkphrase for an address: five words from the
/// supplied list.
pub fn derive_checksum(address: &str, word_list: &WordList) -> Checkphrase {
    derive_checksum_with(address, word_list, &ProtocolParams::V1)
}

/// derive_checksum_with computes the checkphrase for an address under an explicit set of protocol
/// parameters.
pub fn derive_checksum_with(
    address: &str,
    word_list: &WordList,
    params: &ProtocolParams,
) -> Checkphrase {
    trace!(
        iterations = params.iterations(),
        checksum_len = params.checksum_len(),
        "deriving checkphrase"
    );
    let key = derive_key(address, params);
    let indices = extract_indices(&key, params);
    build_phrase(&indices, word_list)
}

/// derive_checksum_from_bytes is derive_checksum for callers holding raw bytes. The bytes must be
/// valid UTF-8; anything else is rejected before any derivation happens.
pub fn derive_checksum_from_bytes(address: &[u8], word_list: &WordList) -> Result<Checkphrase> {
    let address = std::str::from_utf8(address).context("address is not valid UTF-8")?;
    Ok(derive_checksum(address, word_list))
}

/// parse_checkphrase reads a phrase typed or pasted by a user. Words may be separated by
/// whitespace, '-', or both. Every word must be in the list and the word count must match the
/// protocol.
pub fn parse_checkphrase(
    text: &str,
    word_list: &WordList,
    params: &ProtocolParams,
) -> Result<Checkphrase, Error> {
    let words: Vec<&str> = text
        .split(|c: char| c.is_whitespace() || c == PHRASE_SEPARATOR)
        .filter(|w| !w.is_empty())
        .collect();
    if words.len() != params.checksum_len() {
        bail!(
            "expecting {} words but got {} words",
            params.checksum_len(),
            words.len()
        );
    }
    for word in &words {
        if !word_list.contains(word) {
            bail!("word '{}' is not in the word list", word);
        }
    }
    Ok(Checkphrase {
        words: words.into_iter().map(String::from).collect(),
    })
}

/// verify_checkphrase will return an error if the phrase does not match the checkphrase of the
/// address. The error names the first word that differs.
pub fn verify_checkphrase(
    address: &str,
    phrase: &str,
    word_list: &WordList,
    params: &ProtocolParams,
) -> Result<(), Error> {
    let given = match parse_checkphrase(phrase, word_list, params) {
        Ok(p) => p,
        Err(e) => bail!("checkphrase invalid: {}", e),
    };
    let expected = derive_checksum_with(address, word_list, params);
    for (i, (want, got)) in expected.words.iter().zip(given.words.iter()).enumerate() {
        if want != got {
            bail!(
                "word {} of the checkphrase is incorrect, expecting {} but got {}",
                i + 1,
                want,
                got
            );
        }
    }
    Ok(())
}
