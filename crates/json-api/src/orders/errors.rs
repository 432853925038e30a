//! Errors

use readitagain::orders::OrderStatusError;
use salvo::http::StatusError;
use tracing::error;

use readitagain_app::domain::orders::OrdersServiceError;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::Rules(
            reason @ (OrderStatusError::StarsOutOfRange(_) | OrderStatusError::NotCounterparty),
        ) => StatusError::bad_request().brief(reason.to_string()),
        OrdersServiceError::Rules(reason) => StatusError::conflict().brief(reason.to_string()),
        OrdersServiceError::AlreadyExists => StatusError::conflict().brief("Order already exists"),
        OrdersServiceError::InvalidReference
        | OrdersServiceError::MissingRequiredData
        | OrdersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid order payload")
        }
        OrdersServiceError::Sql(source) => {
            error!("orders storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
