//! Create Address Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};

use crate::{
    addresses::{
        errors::into_status_error,
        models::{AddressRequest, AddressResponse},
    },
    extensions::*,
    state::State,
};

/// Create Address Handler
#[endpoint(
    tags("addresses"),
    summary = "Add an Address",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Address created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid address"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<AddressRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<AddressResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let member = depot.member_uuid_or_401()?;

    let address = state
        .app
        .addresses
        .create_address(member, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(address.into()))
}
