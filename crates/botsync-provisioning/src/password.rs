//! Generated account passwords.

use rand::Rng;

/// Characters a generated password is drawn from.
const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of a generated password.
const LENGTH: usize = 100;

/// Generate a fresh random password for a new account.
#[must_use]
pub fn generate() -> String {
    let mut rng = rand::thread_rng();
    (0..LENGTH)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect()
}
