//! Account passwords, stored as Argon2id PHC strings.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// Hash `plain` with a fresh random salt.
pub fn hash_password(plain: &str) -> Result<String, password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
}

/// Whether `plain` matches the stored hash. A stored value that does not
/// parse as a PHC string never matches.
pub fn password_matches(plain: &str, stored: &str) -> bool {
    match PasswordHash::new(stored) {
        Ok(parsed) => Argon2::default()
            .verify_password(plain.as_bytes(), &parsed)
            .is_ok(),
        Err(err) => {
            tracing::error!(error = %err, "Stored password hash is malformed");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashes_are_argon2id() {
        let hash = hash_password("frost-and-fire").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(password_matches("frost-and-fire", &hash));
    }

    #[test]
    fn other_passwords_do_not_match() {
        let hash = hash_password("frost-and-fire").unwrap();
        assert!(!password_matches("Frost-and-fire", &hash));
        assert!(!password_matches("", &hash));
    }

    #[test]
    fn every_hash_gets_its_own_salt() {
        assert_ne!(hash_password("pw").unwrap(), hash_password("pw").unwrap());
    }

    #[test]
    fn malformed_stored_hash_never_matches() {
        assert!(!password_matches("pw", "pw"));
    }
}
