//! Upload Avatar Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    profile::{errors::into_status_error, models::ProfileResponse},
    state::State,
    uploads::{self, ImageKind},
};

/// Multipart field holding the image.
const FILE_FIELD: &str = "file";

/// Upload Avatar Handler
///
/// Accepts a multipart form with a `file` field and makes it the member's
/// avatar.
#[endpoint(
    tags("profile"),
    summary = "Upload Avatar",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Avatar stored"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing or unsupported file"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<ProfileResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let member = depot.member_uuid_or_401()?;

    let file = req
        .file(FILE_FIELD)
        .await
        .ok_or_else(|| StatusError::bad_request().brief("Missing file field"))?;

    let file_name = state
        .uploads
        .store(ImageKind::Avatar, file.path(), file.name())
        .await
        .map_err(uploads::into_status_error)?;

    match state.app.members.set_avatar(member, file_name.clone()).await {
        Ok(member) => Ok(Json(member.into())),
        Err(error) => {
            state.uploads.discard(ImageKind::Avatar, &file_name).await;

            Err(into_status_error(error))
        }
    }
}
