#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(unused_must_use)]
#![deny(unused_mut)]

//! kdf stretches an address into the handful of pseudorandom bytes that the checkphrase is cut
//! from.

use std::fmt;

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;

use crate::params::{ProtocolParams, MAX_KEY_BYTES};

/// DerivedKey is the short PBKDF2 output for one address. It lives for a single derivation and is
/// never logged; its Debug output only shows the length.
#[derive(Clone, PartialEq, Eq)]
pub struct DerivedKey {
    bytes: [u8; MAX_KEY_BYTES],
    len: usize,
}

impl DerivedKey {
    /// as_bytes returns the derived bytes, most significant first.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    #[cfg(test)]
    pub(crate) fn from_slice(bytes: &[u8]) -> DerivedKey {
        let mut key = DerivedKey {
            bytes: [0u8; MAX_KEY_BYTES],
            len: bytes.len(),
        };
        key.bytes[..bytes.len()].copy_from_slice(bytes);
        key
    }
}

impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DerivedKey([redacted; {}])", self.len)
    }
}

/// derive_key runs PBKDF2-HMAC-SHA256 over the UTF-8 bytes of the address with the protocol salt
/// and iteration count, producing exactly params.key_byte_len() bytes. Any text is acceptable,
/// including the empty string.
pub fn derive_key(address: &str, params: &ProtocolParams) -> DerivedKey {
    let len = params.key_byte_len();
    let mut bytes = [0u8; MAX_KEY_BYTES];
    pbkdf2_hmac::<Sha256>(
        address.as_bytes(),
        params.salt().as_bytes(),
        params.iterations(),
        &mut bytes[..len],
    );
    DerivedKey { bytes, len }
}
