//! Token Handler
//!
//! OAuth2 password grant: a form body with `username` and `password`.

use std::{fmt, sync::Arc};

use readitagain_app::auth::AccessToken;
use salvo::{oapi::extract::FormBody, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{auth::errors::into_status_error, extensions::*, state::State};

/// Token Request
#[derive(Deserialize, ToSchema)]
pub(crate) struct TokenRequest {
    pub username: String,
    pub password: String,
    /// Only `password` is supported; may be omitted.
    pub grant_type: Option<String>,
}

impl fmt::Debug for TokenRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenRequest")
            .field("username", &self.username)
            .field("password", &"**redacted**")
            .field("grant_type", &self.grant_type)
            .finish()
    }
}

/// Token Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    /// Seconds until the token expires
    pub expires_in: u64,
}

impl From<AccessToken> for TokenResponse {
    fn from(token: AccessToken) -> Self {
        Self {
            access_token: token.access_token,
            token_type: token.token_type,
            expires_in: token.expires_in,
        }
    }
}

/// Token Handler
#[endpoint(
    tags("auth"),
    summary = "Log in",
    responses(
        (status_code = StatusCode::OK, description = "Access token issued"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unsupported grant type"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Incorrect username or password"),
    ),
)]
pub(crate) async fn handler(
    form: FormBody<TokenRequest>,
    depot: &mut Depot,
) -> Result<Json<TokenResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let form = form.into_inner();

    if form
        .grant_type
        .as_deref()
        .is_some_and(|grant| !grant.is_empty() && grant != "password")
    {
        return Err(StatusError::bad_request().brief("Only the password grant is supported"));
    }

    let token = state
        .app
        .auth
        .login(form.username.trim(), &form.password)
        .await
        .map_err(into_status_error)?;

    Ok(Json(token.into()))
}
