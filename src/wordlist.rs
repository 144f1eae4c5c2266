#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(unused_must_use)]
#![deny(unused_mut)]

//! wordlist holds the validated catalog of 2048 words that checkphrases are drawn from.
//!
//! Only the position of a word matters to the derivation, so two deployments produce comparable
//! phrases only if they load byte-for-byte the same list in the same order. A phrase carries no
//! tag naming its list; use WordList::fingerprint to pin the list identity out of band.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use anyhow::{bail, Result};
use sha2::{Digest, Sha256};
use tracing::debug;

/// WORD_COUNT is the number of entries every word list must have. Each entry is addressable by
/// exactly 11 bits.
pub const WORD_COUNT: usize = 2048;

/// PHRASE_SEPARATOR joins the words of a rendered checkphrase, and so may not appear in a word.
pub const PHRASE_SEPARATOR: char = '-';

const BIP39_ENGLISH: &str = include_str!("wordlists/bip39_english.txt");

/// WordList is an immutable, validated list of exactly 2048 distinct words. Cloning is cheap and
/// clones share the same storage, so one list can be built at startup and handed to any number
/// of threads.
#[derive(Clone, PartialEq, Eq)]
pub struct WordList {
    words: Arc<[String]>,
}

impl WordList {
    /// new validates and builds a word list. The list must have exactly 2048 entries, every entry
    /// must be non-empty and free of whitespace and '-', and no entry may appear twice. A list
    /// that breaks any of these rules is refused outright, never trimmed or padded.
    pub fn new<I, S>(words: I) -> Result<WordList>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words: Vec<String> = words.into_iter().map(Into::into).collect();
        if words.len() != WORD_COUNT {
            bail!(
                "word list must contain exactly {} words, got {}",
                WORD_COUNT,
                words.len()
            );
        }

        let mut seen: HashMap<&str, usize> = HashMap::with_capacity(WORD_COUNT);
        for (i, word) in words.iter().enumerate() {
            if word.is_empty() {
                bail!("word at index {} is empty", i);
            }
            if word
                .chars()
                .any(|c| c.is_whitespace() || c == PHRASE_SEPARATOR)
            {
                bail!(
                    "word '{}' at index {} contains whitespace or '{}'",
                    word,
                    i,
                    PHRASE_SEPARATOR
                );
            }
            if let Some(first) = seen.insert(word.as_str(), i) {
                bail!(
                    "word '{}' appears at both index {} and index {}",
                    word,
                    first,
                    i
                );
            }
        }

        let list = WordList {
            words: words.into(),
        };
        debug!(
            words = WORD_COUNT,
            fingerprint = %list.fingerprint(),
            "validated word list"
        );
        Ok(list)
    }

    /// from_lines builds a word list from plain text with one word per line. Lines are trimmed and
    /// blank lines are skipped.
    pub fn from_lines(text: &str) -> Result<WordList> {
        WordList::new(text.lines().map(str::trim).filter(|line| !line.is_empty()))
    }

    /// bip39_english returns the BIP-39 English word list that ships with the crate. It is parsed
    /// and validated the first time it is requested and shared afterwards.
    ///
    /// # Panics
    /// If the embedded list is not a valid word list, which the test suite rules out.
    pub fn bip39_english() -> &'static WordList {
        static LIST: OnceLock<WordList> = OnceLock::new();
        LIST.get_or_init(|| match WordList::from_lines(BIP39_ENGLISH) {
            Ok(list) => list,
            Err(e) => panic!("embedded BIP-39 word list is invalid: {}", e),
        })
    }

    /// len returns the number of words, which is always WORD_COUNT.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// is_empty is always false, a word list is never empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// get returns the word at index, or None if the index is past the end of the list.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.words.get(index).map(String::as_str)
    }

    /// position returns the index of a word, or None if the word is not in the list.
    pub fn position(&self, word: &str) -> Option<usize> {
        self.words.iter().position(|w| w == word)
    }

    /// contains reports whether the word is in the list.
    pub fn contains(&self, word: &str) -> bool {
        self.position(word).is_some()
    }

    /// iter walks the words in index order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    /// fingerprint returns the lowercase hex SHA-256 of the list in its plain text form, one word
    /// per line with a trailing newline. For a canonical word list file this is the hash of the
    /// file itself.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for word in self.words.iter() {
            hasher.update(word.as_bytes());
            hasher.update(b"\n");
        }
        hasher
            .finalize()
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect()
    }

    // word is only called with indices produced by bit extraction, which are below 2048 by
    // construction.
    pub(crate) fn word(&self, index: u16) -> &str {
        &self.words[usize::from(index)]
    }
}

impl fmt::Debug for WordList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WordList")
            .field("len", &self.len())
            .field("fingerprint", &self.fingerprint())
            .finish()
    }
}
