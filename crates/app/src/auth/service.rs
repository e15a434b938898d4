//! Auth service.

use async_trait::async_trait;
use mockall::automock;
use sha2::{Digest, Sha256};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::auth::{
    errors::AuthServiceError,
    models::{AuthenticatedUser, UserUuid},
};

const FIND_TOKEN_SQL: &str = "\
    SELECT u.uuid AS user_uuid, u.is_admin \
    FROM api_tokens t \
    JOIN users u ON u.uuid = t.user_uuid \
    WHERE t.token_hash = $1";

/// Resolves bearer tokens against the `api_tokens` table.
///
/// Tokens are stored as hex-encoded SHA-256 digests, never in the clear.
#[derive(Debug, Clone)]
pub struct PgAuthService {
    pool: PgPool,
}

impl PgAuthService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn token_hash(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());

    format!("{digest:x}")
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate_bearer(&self, token: &str) -> Result<AuthenticatedUser, AuthServiceError> {
        let row = sqlx::query(FIND_TOKEN_SQL)
            .bind(token_hash(token))
            .fetch_one(&self.pool)
            .await?;

        let user_uuid: Uuid = row.try_get("user_uuid").map_err(AuthServiceError::Sql)?;
        let is_admin: bool = row.try_get("is_admin").map_err(AuthServiceError::Sql)?;

        Ok(AuthenticatedUser {
            uuid: UserUuid::from_uuid(user_uuid),
            is_admin,
        })
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a bearer token to the user it belongs to, including whether
    /// that user holds the admin role.
    async fn authenticate_bearer(&self, token: &str)
    -> Result<AuthenticatedUser, AuthServiceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_hash_is_stable_hex_sha256() {
        assert_eq!(
            token_hash("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
