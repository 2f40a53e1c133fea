//! mysql_native_password scramble helpers.
//!
//! The handshake response carries `SCRAMBLE_LENGTH` bytes of scrambled
//! password. A server stores `SHA1(SHA1(password))` and checks a client's
//! response against the seed it sent in the greeting.

use sha1::{Digest, Sha1};

/// Length of the native-password seed and of the scrambled response
pub const SCRAMBLE_LENGTH: usize = 20;

/// Compute the client's response to `seed`.
///
/// Formula: SHA1(password) XOR SHA1(seed + SHA1(SHA1(password)))
///
/// An empty password yields all zeros.
pub fn scramble(password: &[u8], seed: &[u8]) -> [u8; SCRAMBLE_LENGTH] {
    if password.is_empty() {
        return [0u8; SCRAMBLE_LENGTH];
    }

    // stage1_hash = SHA1(password)
    let stage1_hash = Sha1::digest(password);

    // stage2_hash = SHA1(stage1_hash)
    let stage2_hash = Sha1::digest(stage1_hash);

    // token_hash = SHA1(seed + stage2_hash)
    let mut hasher = Sha1::new();
    hasher.update(seed);
    hasher.update(stage2_hash);
    let token_hash = hasher.finalize();

    let mut result = [0u8; SCRAMBLE_LENGTH];
    for (out, (a, b)) in result.iter_mut().zip(stage1_hash.iter().zip(token_hash.iter())) {
        *out = a ^ b;
    }
    result
}

/// SHA1(SHA1(password)), the value a server keeps for a native-password account
pub fn two_stage_hash(password: &[u8]) -> [u8; SCRAMBLE_LENGTH] {
    let mut out = [0u8; SCRAMBLE_LENGTH];
    out.copy_from_slice(&Sha1::digest(Sha1::digest(password)));
    out
}

/// Verify a client's scrambled `response` against the `seed` sent in the
/// greeting and the account's `stored_hash` (see [`two_stage_hash`]).
///
/// Recovers SHA1(password) as `response XOR SHA1(seed + stored_hash)` and
/// checks that hashing it again gives `stored_hash`.
pub fn check_scramble(response: &[u8], seed: &[u8], stored_hash: &[u8; SCRAMBLE_LENGTH]) -> bool {
    if response.len() != SCRAMBLE_LENGTH {
        return false;
    }

    let mut hasher = Sha1::new();
    hasher.update(seed);
    hasher.update(stored_hash);
    let token_hash = hasher.finalize();

    let mut stage1_hash = [0u8; SCRAMBLE_LENGTH];
    for (out, (a, b)) in stage1_hash.iter_mut().zip(response.iter().zip(token_hash.iter())) {
        *out = a ^ b;
    }

    Sha1::digest(stage1_hash).as_slice() == stored_hash.as_slice()
}
