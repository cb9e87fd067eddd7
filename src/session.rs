use chrono::{DateTime, Duration, Utc};
use hmac::digest::InvalidLength;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::constants::SESSION_TTL_DAYS;

type HmacSha256 = Hmac<Sha256>;

/// Authenticated identity attached to a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub email: String,
}

/// Signs and verifies session cookie values
///
/// A cookie value has the form `email.expires_at.signature`, where
/// `expires_at` is a Unix timestamp and `signature` is the hex-encoded
/// HMAC-SHA256 of `email.expires_at` under the server secret key. The email
/// may itself contain dots; the two trailing fields never do.
#[derive(Clone)]
pub struct SessionKeys {
    mac: HmacSha256,
}

impl std::fmt::Debug for SessionKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionKeys").finish_non_exhaustive()
    }
}

impl SessionKeys {
    pub fn new(secret: &str) -> Result<Self, InvalidLength> {
        Ok(Self {
            mac: HmacSha256::new_from_slice(secret.as_bytes())?,
        })
    }

    /// Session lifetime
    pub fn ttl() -> Duration {
        Duration::days(SESSION_TTL_DAYS)
    }

    fn signer(&self, payload: &str) -> HmacSha256 {
        let mut mac = self.mac.clone();
        mac.update(payload.as_bytes());
        mac
    }

    /// Issue a cookie value for `email`, valid for the session lifetime from `now`
    pub fn issue(&self, email: &str, now: DateTime<Utc>) -> String {
        let expires_at = (now + Self::ttl()).timestamp();
        let payload = format!("{}.{}", email, expires_at);
        let signature = hex::encode(self.signer(&payload).finalize().into_bytes());
        format!("{}.{}", payload, signature)
    }

    /// Verify a cookie value, returning the principal if it is authentic and unexpired
    pub fn verify(&self, value: &str, now: DateTime<Utc>) -> Option<Principal> {
        let mut parts = value.rsplitn(3, '.');
        let signature = parts.next()?;
        let expires_at = parts.next()?;
        let email = parts.next()?;

        if email.is_empty() {
            return None;
        }

        let sig_bytes = match hex::decode(signature) {
            Ok(bytes) => bytes,
            Err(_) => {
                tracing::warn!("Invalid hex signature format in session cookie");
                return None;
            }
        };

        let payload = format!("{}.{}", email, expires_at);
        if self.signer(&payload).verify_slice(&sig_bytes).is_err() {
            tracing::warn!("Session cookie signature mismatch");
            return None;
        }

        let expires_at: i64 = expires_at.parse().ok()?;
        if now.timestamp() >= expires_at {
            tracing::debug!("Session expired for {}", email);
            return None;
        }

        Some(Principal {
            email: email.to_string(),
        })
    }
}
