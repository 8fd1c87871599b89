//! Argon2id password hasher implementation.

use application::error::{Result, ToInternal};
use application::ports::outbound::PasswordHasher;
use argon2::password_hash::{
    PasswordHash, PasswordHasher as Argon2PasswordHasherTrait,
    PasswordVerifier, SaltString,
};
use argon2::{Argon2, Params, Version};
use domain::auth::password::{Password, PasswordHash as DomainPasswordHash};
use rand::rngs::OsRng;

use crate::config::Argon2 as Argon2Config;

const OUTPUT_LENGTH: usize = 32;

/// Argon2id password hasher adapter.
///
/// Each `hash` call draws a fresh random salt, so hashing the same
/// plaintext twice yields different PHC strings that both verify.
pub struct Argon2PasswordHasher {
    params: Params,
}

impl Argon2PasswordHasher {
    /// Create a new Argon2 hasher with custom parameters.
    pub fn new(
        memory_cost: u32,
        iterations: u32,
        parallelism: u32,
    ) -> Result<Self> {
        let params = Params::new(
            memory_cost,
            iterations,
            parallelism,
            Some(OUTPUT_LENGTH),
        )
        .catch()?;

        Ok(Self { params })
    }

    /// Create a hasher from the `argon2` configuration section.
    pub fn from_config(config: &Argon2Config) -> Result<Self> {
        let params = Params::new(
            config.memory_cost,
            config.iterations,
            config.parallelism,
            Some(config.hash_length),
        )
        .catch()?;

        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'_> {
        Argon2::new(
            argon2::Algorithm::Argon2id,
            Version::V0x13,
            self.params.clone(),
        )
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &Password) -> Result<DomainPasswordHash> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = self
            .argon2()
            .hash_password(password.as_bytes(), &salt)
            .catch()?;

        Ok(DomainPasswordHash::parse(hash.to_string())?)
    }

    fn verify(
        &self,
        candidate: &Password,
        hash: &DomainPasswordHash,
    ) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(hash.as_str()) else {
            return false;
        };

        self.argon2()
            .verify_password(candidate.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Cheap parameters; production values come from configuration.
    fn hasher() -> Argon2PasswordHasher {
        Argon2PasswordHasher::new(1024, 1, 1).unwrap()
    }

    #[test]
    fn test_fresh_salt_per_hash() {
        let hasher = hasher();
        let password = Password::new("correct horse").unwrap();

        let first = hasher.hash(&password).unwrap();
        let second = hasher.hash(&password).unwrap();

        assert_ne!(first.as_str(), second.as_str());
        assert!(hasher.verify(&password, &first));
        assert!(hasher.verify(&password, &second));
    }

    #[test]
    fn test_verify_rejects_wrong_password() {
        let hasher = hasher();
        let hash = hasher.hash(&Password::new("correct").unwrap()).unwrap();

        assert!(!hasher.verify(&Password::new("wrong").unwrap(), &hash));
    }

    #[test]
    fn test_verify_rejects_foreign_hash() {
        let hasher = hasher();
        // PHC-shaped but not a readable argon2 hash.
        let hash =
            DomainPasswordHash::parse("$unknown$v=1$x=1$c2FsdA$aGFzaA")
                .unwrap();

        assert!(!hasher.verify(&Password::new("anything").unwrap(), &hash));
    }
}
