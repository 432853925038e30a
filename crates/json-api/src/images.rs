//! Get Image Handler

use std::sync::Arc;

use salvo::{fs::NamedFile, oapi::extract::PathParam, prelude::*};
use serde::Deserialize;
use tokio::fs;

use crate::{
    extensions::*,
    state::State,
    uploads::{ImageKind, UploadError},
};

/// Image Query
#[derive(Debug, Deserialize, ToParameters)]
#[salvo(parameters(default_parameter_in = Query))]
pub(crate) struct ImageQuery {
    /// `book` or `avatar`
    #[serde(rename = "type")]
    pub kind: ImageKind,
}

/// Get Image Handler
///
/// Streams a stored book picture or avatar.
#[endpoint(
    tags("images"),
    summary = "Get Image",
    responses(
        (status_code = StatusCode::OK, description = "Image file"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid file name or type"),
        (status_code = StatusCode::NOT_FOUND, description = "Image not found"),
    ),
)]
pub(crate) async fn handler(
    file: PathParam<String>,
    query: ImageQuery,
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let path = state
        .uploads
        .locate(query.kind, &file.into_inner())
        .map_err(|error: UploadError| StatusError::bad_request().brief(error.to_string()))?;

    if !fs::try_exists(&path).await.or_500("failed to stat image")? {
        return Err(StatusError::not_found().brief("Image not found"));
    }

    NamedFile::builder(path).send(req.headers(), res).await;

    Ok(())
}
