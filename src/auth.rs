use std::sync::OnceLock;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::session::Principal;

/// Read-only access to the persisted users table
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Stored password hash for `email`, if such a user exists
    async fn find_password_hash(&self, email: &str) -> Result<Option<String>>;

    /// Check that the store is reachable
    async fn ping(&self) -> Result<()>;
}

/// Hash a password using Argon2
///
/// Produces a PHC string with a random salt, suitable for the
/// `users.password_hash` column.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::PasswordHash(e.to_string()))
}

/// Verify a password against a stored Argon2 hash
///
/// A stored value that is not a valid PHC string never matches.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::error!("Stored password hash is not a valid PHC string: {}", e);
            return false;
        }
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

/// Check credentials against the store
///
/// Returns `None` for both an unknown email and a wrong password so callers
/// cannot tell the two apart.
pub async fn authenticate(
    store: &dyn CredentialStore,
    email: &str,
    password: &str,
) -> Result<Option<Principal>> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Ok(None);
    }

    let stored = store.find_password_hash(email).await?;
    let known = stored.is_some();

    // Argon2 verification is CPU-bound. Unknown users are checked against a
    // dummy hash so both rejections cost the same.
    let candidate = password.to_string();
    let matched = tokio::task::spawn_blocking(move || match stored {
        Some(hash) => verify_password(&candidate, &hash),
        None => {
            if let Some(dummy) = dummy_hash() {
                verify_password(&candidate, dummy);
            }
            false
        }
    })
    .await?;

    if matched {
        tracing::info!("Login accepted for {}", email);
        Ok(Some(Principal {
            email: email.to_string(),
        }))
    } else if known {
        tracing::info!("Login rejected: password mismatch");
        Ok(None)
    } else {
        tracing::info!("Login rejected: unknown user");
        Ok(None)
    }
}

static DUMMY_HASH: OnceLock<Option<String>> = OnceLock::new();

/// Hash checked in place of a missing user's, computed on first use
fn dummy_hash() -> Option<&'static str> {
    DUMMY_HASH
        .get_or_init(|| match hash_password("unknown-user-placeholder") {
            Ok(hash) => Some(hash),
            Err(e) => {
                tracing::error!("Failed to prepare dummy password hash: {}", e);
                None
            }
        })
        .as_deref()
}
