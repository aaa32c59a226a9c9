// ============================
// crates/backend-lib/src/auth/password.rs
// ============================
//! Password hashing and verification.
//!
//! Hashes are PHC strings (`$scrypt$ln=17,r=8,p=1$<salt>$<digest>`), so the
//! salt and the work factor travel with the hash and verification needs
//! neither of them up front.
use rand::RngCore;
use scrypt::{password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString}, Params, Scrypt};
use zeroize::Zeroize;

use crate::error::AppError;

/// Default work factor (log2 of the scrypt N parameter)
pub const DEFAULT_HASH_COST: u8 = Params::RECOMMENDED_LOG_N;

/// Upper bound accepted for the work factor
pub const MAX_HASH_COST: u8 = 20;

const SALT_BYTES: usize = 16;
const BLOCK_SIZE: u32 = 8;
const PARALLELISM: u32 = 1;
const OUTPUT_LEN: usize = 32;

/// Hash a password using scrypt with a fresh random salt
pub fn hash_password(plain: &str, cost: u8) -> Result<String, AppError> {
    let params = Params::new(cost, BLOCK_SIZE, PARALLELISM, OUTPUT_LEN)
        .map_err(|e| AppError::Internal(format!("invalid hash cost {cost}: {e}")))?;

    let mut salt_bytes = [0u8; SALT_BYTES];
    rand::rng().fill_bytes(&mut salt_bytes);
    let salt = SaltString::encode_b64(&salt_bytes)
        .map_err(|e| AppError::Internal(format!("salt encoding failed: {e}")))?;

    let hash = Scrypt
        .hash_password_customized(plain.as_bytes(), None, None, params, &salt)
        .map_err(|e| AppError::Internal(format!("password hashing failed: {e}")))?
        .to_string();
    Ok(hash)
}

/// Verify a password against a hash.
///
/// The digest comparison is constant-time. A malformed hash never verifies.
pub fn verify_password(hash: &str, plain: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };
    Scrypt.verify_password(plain.as_bytes(), &parsed_hash).is_ok()
}

/// Hash a password and zeroize the original
pub fn hash_password_secure(plain: &mut String, cost: u8) -> Result<String, AppError> {
    let hash = hash_password(plain, cost);
    plain.zeroize();
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_COST: u8 = 4;

    #[test]
    fn test_password_hashing_and_verification() {
        let hash = hash_password("secret1", TEST_COST).unwrap();

        assert_ne!(hash, "secret1");
        assert!(verify_password(&hash, "secret1"));
        assert!(!verify_password(&hash, "wrong"));
        assert!(!verify_password(&hash, ""));
    }

    #[test]
    fn test_salt_uniqueness() {
        let first = hash_password("secret1", TEST_COST).unwrap();
        let second = hash_password("secret1", TEST_COST).unwrap();

        assert_ne!(first, second);
        assert!(verify_password(&first, "secret1"));
        assert!(verify_password(&second, "secret1"));
    }

    #[test]
    fn test_default_cost_matches_scrypt_recommendation() {
        assert!(DEFAULT_HASH_COST >= Params::RECOMMENDED_LOG_N);
        assert!(DEFAULT_HASH_COST <= MAX_HASH_COST);
    }

    #[test]
    fn test_cost_is_embedded_in_hash() {
        let hash = hash_password("secret1", 10).unwrap();
        assert!(hash.starts_with("$scrypt$"));
        assert!(hash.contains("ln=10"));

        // Verification reads the cost back out of the hash
        let cheap = hash_password("secret1", TEST_COST).unwrap();
        assert!(cheap.contains("ln=4"));
        assert!(verify_password(&cheap, "secret1"));
    }

    #[test]
    fn test_malformed_hash_never_verifies() {
        assert!(!verify_password("not-a-phc-string", "secret1"));
        assert!(!verify_password("", ""));
    }

    #[test]
    fn test_hash_password_secure_zeroizes_input() {
        let mut plain = "secret1".to_string();
        let hash = hash_password_secure(&mut plain, TEST_COST).unwrap();

        assert!(plain.is_empty());
        assert!(verify_password(&hash, "secret1"));
    }
}
