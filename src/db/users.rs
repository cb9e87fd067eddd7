use async_trait::async_trait;
use sqlx::PgPool;

use crate::auth::CredentialStore;
use crate::error::Result;

/// Credential lookups against the Postgres `users` table
#[derive(Debug, Clone)]
pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn find_password_hash(&self, email: &str) -> Result<Option<String>> {
        // The connection goes back to the pool when `conn` drops, on every path
        let mut conn = self.pool.acquire().await?;

        let hash: Option<(String,)> =
            sqlx::query_as("SELECT password_hash FROM users WHERE email = $1")
                .bind(email)
                .fetch_optional(&mut *conn)
                .await?;

        Ok(hash.map(|(hash,)| hash))
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
