//! Referral code generation.

use rand::RngExt;

/// Charset for generated referral codes: Crockford base32 (no I, L, O, U),
/// 32 symbols so 8 characters give 40 bits of entropy.
const CHARSET: &[u8] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

/// Generated referral code length in characters.
pub const REFERRAL_CODE_LEN: usize = 8;

/// Fixed referral code assigned to the bootstrap admin account. Every other
/// account gets a generated code.
pub const FIRST_ADMIN_REFERRAL_CODE: &str = "PARTLINE01";

/// Generate a fresh referral code. Collision probability is negligible but
/// not zero; callers must verify against the store and re-roll on collision.
pub fn generate_code() -> String {
    let mut rng = rand::rng();
    (0..REFERRAL_CODE_LEN)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}
