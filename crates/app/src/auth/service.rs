//! Auth service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tokio::task::spawn_blocking;
use tracing::{info, warn};
use zeroize::Zeroizing;

use crate::{
    auth::{
        errors::AuthServiceError,
        models::{AccessToken, NewMember},
        password::{hash_password, verify_password},
        repository::PgAuthRepository,
        token::TokenSigner,
    },
    database::Db,
    domain::members::records::{MemberRecord, MemberUuid},
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    db: Db,
    repository: PgAuthRepository,
    signer: Arc<TokenSigner>,
}

impl PgAuthService {
    #[must_use]
    pub fn new(db: Db, signer: TokenSigner) -> Self {
        Self {
            db,
            repository: PgAuthRepository::new(),
            signer: Arc::new(signer),
        }
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    #[tracing::instrument(
        name = "auth.service.register",
        skip(self, member),
        fields(member_uuid = %member.uuid, username = %member.username),
        err
    )]
    async fn register(&self, member: NewMember) -> Result<MemberRecord, AuthServiceError> {
        member.validate()?;

        let password = member.password.clone();
        let password_hash = spawn_blocking(move || hash_password(&password)).await??;

        let mut tx = self.db.begin().await?;

        let record = self
            .repository
            .create_member(&mut tx, &member, &password_hash)
            .await?;

        tx.commit().await?;

        info!(member_uuid = %record.uuid, "registered member");

        Ok(record)
    }

    #[tracing::instrument(
        name = "auth.service.login",
        skip(self, password),
        fields(username = %username),
        err
    )]
    async fn login(&self, username: &str, password: &str) -> Result<AccessToken, AuthServiceError> {
        let mut tx = self.db.begin().await?;

        let credentials = self.repository.find_credentials(&mut tx, username).await?;

        tx.commit().await?;

        let Some(credentials) = credentials else {
            warn!("login for unknown username");

            return Err(AuthServiceError::InvalidCredentials);
        };

        let password = Zeroizing::new(password.to_owned());
        let stored = credentials.password_hash;

        let verified = spawn_blocking(move || verify_password(&password, &stored)).await??;

        if !verified {
            warn!(member_uuid = %credentials.uuid, "login with wrong password");

            return Err(AuthServiceError::InvalidCredentials);
        }

        let token = self.signer.issue(credentials.uuid, Timestamp::now())?;

        info!(member_uuid = %credentials.uuid, "issued access token");

        Ok(token)
    }

    async fn authenticate_bearer(
        &self,
        bearer_token: &str,
    ) -> Result<MemberUuid, AuthServiceError> {
        let member = self
            .signer
            .verify(bearer_token)
            .map_err(|_| AuthServiceError::InvalidToken)?;

        let mut tx = self.db.begin().await?;

        let exists = self.repository.member_exists(&mut tx, member).await?;

        tx.commit().await?;

        if !exists {
            return Err(AuthServiceError::InvalidToken);
        }

        Ok(member)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create a member with a freshly hashed password.
    async fn register(&self, member: NewMember) -> Result<MemberRecord, AuthServiceError>;

    /// Exchange a username and password for a bearer token.
    async fn login(&self, username: &str, password: &str) -> Result<AccessToken, AuthServiceError>;

    /// Resolve a bearer token to the member it was issued for.
    async fn authenticate_bearer(&self, bearer_token: &str)
    -> Result<MemberUuid, AuthServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::{
        TestContext,
        helpers::{TEST_PASSWORD, new_member, register_member},
    };

    use super::*;

    #[tokio::test]
    async fn register_stores_member_with_username_as_display_name() -> TestResult {
        let ctx = TestContext::new().await;

        let record = ctx.auth.register(new_member("reader")).await?;

        assert_eq!(record.username, "reader");
        assert_eq!(record.display_name, "reader");

        Ok(())
    }

    #[tokio::test]
    async fn register_duplicate_username_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.auth.register(new_member("reader")).await?;

        let mut again = new_member("reader");
        again.email = "other@example.com".to_string();

        let result = ctx.auth.register(again).await;

        assert!(
            matches!(result, Err(AuthServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn login_then_authenticate_round_trips_member() -> TestResult {
        let ctx = TestContext::new().await;
        let member = register_member(&ctx, "reader").await?;

        let token = ctx.auth.login("reader", TEST_PASSWORD).await?;
        let authenticated = ctx.auth.authenticate_bearer(&token.access_token).await?;

        assert_eq!(authenticated, member);

        Ok(())
    }

    #[tokio::test]
    async fn login_with_wrong_password_returns_invalid_credentials() -> TestResult {
        let ctx = TestContext::new().await;
        register_member(&ctx, "reader").await?;

        let result = ctx.auth.login("reader", "not the password").await;

        assert!(
            matches!(result, Err(AuthServiceError::InvalidCredentials)),
            "expected InvalidCredentials, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn login_with_unknown_username_returns_invalid_credentials() {
        let ctx = TestContext::new().await;

        let result = ctx.auth.login("nobody", TEST_PASSWORD).await;

        assert!(
            matches!(result, Err(AuthServiceError::InvalidCredentials)),
            "expected InvalidCredentials, got {result:?}"
        );
    }

    #[tokio::test]
    async fn token_for_unknown_member_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;

        let token = ctx.signer.issue(MemberUuid::new(), Timestamp::now())?;
        let result = ctx.auth.authenticate_bearer(&token.access_token).await;

        assert!(
            matches!(result, Err(AuthServiceError::InvalidToken)),
            "expected InvalidToken, got {result:?}"
        );

        Ok(())
    }
}
