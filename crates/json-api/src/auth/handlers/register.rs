//! Register Member Handler

use std::{fmt, sync::Arc};

use readitagain_app::{
    auth::NewMember,
    domain::members::records::{MemberRecord, MemberUuid},
};
use salvo::{oapi::extract::JsonBody, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::{auth::errors::into_status_error, extensions::*, state::State};

/// Register Member Request
#[derive(Deserialize, ToSchema)]
pub(crate) struct RegisterRequest {
    /// 3 to 32 letters, digits or underscores
    pub username: String,
    pub email: String,
    /// At least 8 characters
    pub password: String,
    /// Defaults to the username
    pub display_name: Option<String>,
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"**redacted**")
            .field("display_name", &self.display_name)
            .finish()
    }
}

impl From<RegisterRequest> for NewMember {
    fn from(request: RegisterRequest) -> Self {
        NewMember {
            uuid: MemberUuid::new(),
            username: request.username.trim().to_string(),
            email: request.email.trim().to_string(),
            password: Zeroizing::new(request.password),
            display_name: request.display_name,
        }
    }
}

/// Registered Member Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RegisteredResponse {
    pub uuid: Uuid,
    pub username: String,
    pub display_name: String,
}

impl From<MemberRecord> for RegisteredResponse {
    fn from(member: MemberRecord) -> Self {
        Self {
            uuid: member.uuid.into(),
            username: member.username,
            display_name: member.display_name,
        }
    }
}

/// Register Member Handler
#[endpoint(
    tags("auth"),
    summary = "Register",
    responses(
        (status_code = StatusCode::CREATED, description = "Member registered"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid username, email or password"),
        (status_code = StatusCode::CONFLICT, description = "Username or email already registered"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<RegisterRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<RegisteredResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let member = state
        .app
        .auth
        .register(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(member.into()))
}
