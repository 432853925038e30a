//! Auth Config

use clap::Args;
use jiff::SignedDuration;
use readitagain_app::auth::{TokenError, TokenSigner};

/// Access token settings.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// Secret used to sign and verify access tokens
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: String,

    /// Access token lifetime in minutes
    #[arg(long, env = "TOKEN_TTL_MINUTES", default_value_t = 30)]
    pub token_ttl_minutes: u32,
}

impl AuthConfig {
    /// Build the token signer shared by login and the auth middleware.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty secret or a zero lifetime.
    pub fn signer(&self) -> Result<TokenSigner, TokenError> {
        TokenSigner::new(
            self.jwt_secret.as_bytes(),
            SignedDuration::from_mins(i64::from(self.token_ttl_minutes)),
        )
    }
}
