// SPDX-FileCopyrightText: 2026 Aegis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Low-level AES-256-GCM seal/open operations.
//!
//! Every call to [`seal`] draws a fresh random 96-bit nonce from the system
//! CSPRNG. Reusing a nonce under the same key breaks both confidentiality and
//! integrity of GCM.

use aegis_core::AegisError;
use ring::aead::{Aad, LessSafeKey, Nonce, UnboundKey, AES_256_GCM, NONCE_LEN};
use ring::rand::{SecureRandom, SystemRandom};

/// Nonce length in bytes (96 bits).
pub const NONCE_SIZE: usize = NONCE_LEN;

/// Authentication tag length in bytes (128 bits).
pub const TAG_SIZE: usize = 16;

/// Build an AES-256-GCM key from 32 raw bytes.
pub fn build_key(key: &[u8; 32]) -> Result<LessSafeKey, AegisError> {
    let unbound = UnboundKey::new(&AES_256_GCM, key)
        .map_err(|_| AegisError::Configuration("failed to create AES-256-GCM key".to_string()))?;
    Ok(LessSafeKey::new(unbound))
}

/// Encrypt plaintext under `key` with a fresh random nonce.
///
/// Returns `nonce || ciphertext || tag`.
pub fn seal(
    key: &LessSafeKey,
    rng: &dyn SecureRandom,
    plaintext: &[u8],
) -> Result<Vec<u8>, AegisError> {
    let mut nonce_bytes = [0u8; NONCE_SIZE];
    rng.fill(&mut nonce_bytes)
        .map_err(|_| AegisError::Encryption("failed to encrypt data".to_string()))?;

    let mut in_out = plaintext.to_vec();
    key.seal_in_place_append_tag(
        Nonce::assume_unique_for_key(nonce_bytes),
        Aad::empty(),
        &mut in_out,
    )
    .map_err(|_| AegisError::Encryption("failed to encrypt data".to_string()))?;

    let mut output = Vec::with_capacity(NONCE_SIZE + in_out.len());
    output.extend_from_slice(&nonce_bytes);
    output.append(&mut in_out);
    Ok(output)
}

/// Decrypt `nonce || ciphertext || tag` produced by [`seal`].
///
/// Fails if the input is shorter than a nonce, the key is wrong, or any byte
/// was altered. Never returns unauthenticated plaintext.
pub fn open(key: &LessSafeKey, sealed: &[u8]) -> Result<Vec<u8>, AegisError> {
    if sealed.len() < NONCE_SIZE {
        return Err(AegisError::Decryption("failed to decrypt data".to_string()));
    }

    let (nonce_bytes, ciphertext) = sealed.split_at(NONCE_SIZE);
    let nonce = Nonce::try_assume_unique_for_key(nonce_bytes)
        .map_err(|_| AegisError::Decryption("failed to decrypt data".to_string()))?;

    let mut in_out = ciphertext.to_vec();
    let plaintext = key
        .open_in_place(nonce, Aad::empty(), &mut in_out)
        .map_err(|_| AegisError::Decryption("failed to decrypt data".to_string()))?;

    Ok(plaintext.to_vec())
}
