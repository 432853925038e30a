//! Update Profile Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};

use crate::{
    extensions::*,
    profile::{
        errors::into_status_error,
        models::{ProfileRequest, ProfileResponse},
    },
    state::State,
};

/// Update Profile Handler
///
/// Replaces display name, email and phone. A blank phone clears it.
#[endpoint(
    tags("profile"),
    summary = "Edit My Profile",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Profile updated"),
        (status_code = StatusCode::CONFLICT, description = "Email already registered"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<ProfileRequest>,
    depot: &mut Depot,
) -> Result<Json<ProfileResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let member = depot.member_uuid_or_401()?;

    let member = state
        .app
        .members
        .update_profile(member, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(member.into()))
}
