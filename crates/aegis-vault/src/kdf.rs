// SPDX-FileCopyrightText: 2026 Aegis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! PBKDF2-HMAC-SHA256 key derivation from the configured passphrase.
//!
//! Parameters are fixed so that an unchanged passphrase always yields the same
//! key and previously stored ciphertexts stay readable across restarts.

use std::num::NonZeroU32;

use ring::pbkdf2;
use zeroize::Zeroizing;

/// Salt shared by every installation. Versioned so a future per-installation
/// salt can coexist with payloads derived under this one.
pub const KDF_SALT: &[u8] = b"aegis-encryption-salt-v1";

/// PBKDF2 iteration count.
pub const KDF_ITERATIONS: NonZeroU32 = match NonZeroU32::new(65_536) {
    Some(n) => n,
    None => panic!("iteration count must be non-zero"),
};

/// Derived key length in bytes (AES-256).
pub const KEY_LEN: usize = 32;

/// Derive a 32-byte key from `passphrase` with the fixed salt and iteration count.
pub fn derive_key(passphrase: &[u8]) -> Zeroizing<[u8; KEY_LEN]> {
    derive_key_with(passphrase, KDF_SALT, KDF_ITERATIONS)
}

/// Derive a 32-byte key with explicit salt and iteration count.
pub fn derive_key_with(
    passphrase: &[u8],
    salt: &[u8],
    iterations: NonZeroU32,
) -> Zeroizing<[u8; KEY_LEN]> {
    let mut output = Zeroizing::new([0u8; KEY_LEN]);
    pbkdf2::derive(
        pbkdf2::PBKDF2_HMAC_SHA256,
        iterations,
        salt,
        passphrase,
        &mut output[..],
    );
    output
}
