//! Errors

use salvo::http::StatusError;
use tracing::error;

use readitagain_app::domain::coupons::CouponsServiceError;

pub(crate) fn into_status_error(error: CouponsServiceError) -> StatusError {
    match error {
        CouponsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Coupon code already in use")
        }
        CouponsServiceError::NotFound => StatusError::not_found().brief("Coupon not found"),
        CouponsServiceError::Frozen => StatusError::conflict()
            .brief("Coupon is referenced by an order and can no longer be changed"),
        CouponsServiceError::Terms(reason) => StatusError::bad_request().brief(reason.to_string()),
        CouponsServiceError::InvalidReference
        | CouponsServiceError::MissingRequiredData
        | CouponsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid coupon payload")
        }
        CouponsServiceError::Sql(source) => {
            error!("coupons storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
