//! Bearer token issuance and verification.

use std::fmt;

use jiff::{SignedDuration, Timestamp};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;

use crate::{
    auth::models::{AccessToken, Claims},
    domain::members::records::MemberUuid,
};

/// Token type reported to OAuth2 password-grant clients.
pub const TOKEN_TYPE: &str = "bearer";

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token signing secret is empty")]
    EmptySecret,

    #[error("token lifetime must be positive")]
    NonPositiveLifetime,

    #[error("token expiry is out of range")]
    ExpiryOutOfRange,

    #[error("token is invalid")]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

/// Signs and checks HS256 access tokens.
#[derive(Clone)]
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    lifetime: SignedDuration,
}

impl TokenSigner {
    /// Build a signer from a shared secret.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty secret or a non-positive lifetime.
    pub fn new(secret: &[u8], lifetime: SignedDuration) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::EmptySecret);
        }

        if !lifetime.is_positive() {
            return Err(TokenError::NonPositiveLifetime);
        }

        let mut validation = Validation::new(Algorithm::HS256);

        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            lifetime,
        })
    }

    /// Issue a token for `member`, valid from `now` for the configured lifetime.
    ///
    /// # Errors
    ///
    /// Returns an error if the expiry overflows or signing fails.
    pub fn issue(&self, member: MemberUuid, now: Timestamp) -> Result<AccessToken, TokenError> {
        let issued_at = now.as_second();

        let expires_at = issued_at
            .checked_add(self.lifetime.as_secs())
            .ok_or(TokenError::ExpiryOutOfRange)?;

        let claims = Claims {
            sub: member.into_uuid(),
            iat: issued_at,
            exp: expires_at,
        };

        let access_token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?;

        Ok(AccessToken {
            access_token,
            token_type: TOKEN_TYPE.to_string(),
            expires_in: self.lifetime.as_secs().unsigned_abs(),
        })
    }

    /// Check signature and expiry, returning the subject.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is malformed, forged or expired.
    pub fn verify(&self, token: &str) -> Result<MemberUuid, TokenError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation)?;

        Ok(MemberUuid::from_uuid(data.claims.sub))
    }
}

impl fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSigner")
            .field("keys", &"**redacted**")
            .field("lifetime", &self.lifetime)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn signer(secret: &[u8]) -> TokenSigner {
        TokenSigner::new(secret, SignedDuration::from_mins(30)).expect("valid signer")
    }

    #[test]
    fn issued_token_verifies_to_its_subject() -> TestResult {
        let signer = signer(b"test-secret");
        let member = MemberUuid::new();

        let token = signer.issue(member, Timestamp::now())?;

        assert_eq!(token.token_type, "bearer");
        assert_eq!(token.expires_in, 30 * 60);
        assert_eq!(signer.verify(&token.access_token)?, member);

        Ok(())
    }

    #[test]
    fn expired_token_is_rejected() -> TestResult {
        let signer = signer(b"test-secret");
        let issued = Timestamp::now() - SignedDuration::from_hours(2);

        let token = signer.issue(MemberUuid::new(), issued)?;

        assert!(signer.verify(&token.access_token).is_err());

        Ok(())
    }

    #[test]
    fn token_from_another_secret_is_rejected() -> TestResult {
        let token = signer(b"one-secret").issue(MemberUuid::new(), Timestamp::now())?;

        assert!(signer(b"another-secret").verify(&token.access_token).is_err());

        Ok(())
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(signer(b"test-secret").verify("not.a.jwt").is_err());
    }

    #[test]
    fn empty_secret_is_refused() {
        assert!(matches!(
            TokenSigner::new(b"", SignedDuration::from_mins(30)),
            Err(TokenError::EmptySecret)
        ));
    }

    #[test]
    fn debug_output_hides_keys() {
        let rendered = format!("{:?}", signer(b"super-secret-value"));

        assert!(!rendered.contains("super-secret-value"));
    }
}
