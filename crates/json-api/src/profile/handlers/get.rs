//! Get Profile Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    profile::{errors::into_status_error, models::ProfileResponse},
    state::State,
};

/// Get Profile Handler
#[endpoint(tags("profile"), summary = "My Profile", security(("bearer_auth" = [])))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ProfileResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let member = depot.member_uuid_or_401()?;

    let member = state
        .app
        .members
        .get_profile(member)
        .await
        .map_err(into_status_error)?;

    Ok(Json(member.into()))
}
