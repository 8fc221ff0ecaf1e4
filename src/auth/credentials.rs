use anyhow::{Context, Result};

/// Result of checking a presented PIN against the stored credential
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verification {
    Valid {
        /// The stored value is a legacy plaintext PIN and should be re-hashed
        needs_upgrade: bool,
    },
    Invalid,
}

pub trait CredentialCheck: Send + Sync {
    fn hash(&self, secret: &str) -> Result<String>;

    fn verify(&self, secret: &str, stored: &str) -> Result<Verification>;
}

const BCRYPT_PREFIXES: [&str; 3] = ["$2a$", "$2b$", "$2y$"];

/// bcrypt hashes, accepting legacy plaintext PINs until their first login
pub struct BcryptCredentials {
    cost: u32,
}

impl BcryptCredentials {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn is_hashed(stored: &str) -> bool {
        BCRYPT_PREFIXES.iter().any(|prefix| stored.starts_with(prefix))
    }
}

impl CredentialCheck for BcryptCredentials {
    fn hash(&self, secret: &str) -> Result<String> {
        bcrypt::hash(secret, self.cost).context("Failed to hash PIN")
    }

    fn verify(&self, secret: &str, stored: &str) -> Result<Verification> {
        if Self::is_hashed(stored) {
            let matches = bcrypt::verify(secret, stored).context("Failed to verify PIN hash")?;
            return Ok(if matches {
                Verification::Valid { needs_upgrade: false }
            } else {
                Verification::Invalid
            });
        }

        if !stored.is_empty() && secret == stored {
            Ok(Verification::Valid { needs_upgrade: true })
        } else {
            Ok(Verification::Invalid)
        }
    }
}
