//! Property-based tests for checkphrase derivation
//!
//! Uses proptest to check the derivation invariants over many generated addresses.

use human_checkphrase::{
    derive_checksum, derive_checksum_with, parse_checkphrase, verify_checkphrase, ProtocolParams,
    WordList, SALT,
};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))] // Reduced cases due to slow PBKDF2

    /// Property: Determinism and shape
    ///
    /// Deriving twice gives the same five words, all drawn from the list.
    #[test]
    fn prop_deterministic_shape(address in any::<String>()) {
        let list = WordList::bip39_english();
        let first = derive_checksum(&address, list);
        let second = derive_checksum(&address, list);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.len(), 5);
        for word in first.words() {
            prop_assert!(list.contains(word));
        }
    }

    /// Property: Lookalikes diverge
    ///
    /// Changing one character of an address changes its phrase.
    #[test]
    fn prop_lookalike_differs(
        address in "[1-9A-HJ-NP-Za-km-z]{26,34}",
        position in any::<prop::sample::Index>(),
        replacement in "[1-9A-HJ-NP-Za-km-z]",
    ) {
        let mut chars: Vec<char> = address.chars().collect();
        let at = position.index(chars.len());
        let replacement = replacement.chars().next().unwrap();
        prop_assume!(chars[at] != replacement);
        chars[at] = replacement;
        let lookalike: String = chars.into_iter().collect();

        let list = WordList::bip39_english();
        prop_assert_ne!(derive_checksum(&address, list), derive_checksum(&lookalike, list));
    }

    /// Property: Rendered phrases read back
    ///
    /// The hyphenated rendering of a phrase parses to the same phrase and verifies against its
    /// address.
    #[test]
    fn prop_rendered_phrase_verifies(address in "\\PC{0,64}") {
        let list = WordList::bip39_english();
        let params = ProtocolParams::V1;
        let phrase = derive_checksum(&address, list);
        let parsed = parse_checkphrase(&phrase.to_string(), list, &params).unwrap();
        prop_assert_eq!(&parsed, &phrase);
        prop_assert!(verify_checkphrase(&address, &phrase.to_string(), list, &params).is_ok());
    }

    /// Property: Every supported checksum length
    ///
    /// Any valid checksum length yields exactly that many words from the list.
    #[test]
    fn prop_checksum_lengths(address in "[a-z0-9]{0,48}", checksum_len in 1usize..=11) {
        let list = WordList::bip39_english();
        let params = ProtocolParams::new(SALT, 64, checksum_len).unwrap();
        let phrase = derive_checksum_with(&address, list, &params);
        prop_assert_eq!(phrase.len(), checksum_len);
        for word in phrase.words() {
            prop_assert!(list.contains(word));
        }
    }
}
