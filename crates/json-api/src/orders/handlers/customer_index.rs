//! Customer Orders Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    extensions::*,
    orders::{
        errors::into_status_error,
        models::{OrdersResponse, parse_status_filter},
    },
    state::State,
};

/// Customer Orders Handler
///
/// Lists the orders you placed, newest first. `status` is one of `all`,
/// `to_ship`, `shipping`, `completed` or `cancellation`.
#[endpoint(tags("orders"), summary = "My Purchases", security(("bearer_auth" = [])))]
pub(crate) async fn handler(
    status: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<OrdersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.member_uuid_or_401()?;

    let filter = parse_status_filter(status.into_inner())?;

    let orders = state
        .app
        .orders
        .list_customer_orders(customer, filter)
        .await
        .map_err(into_status_error)?;

    Ok(Json(orders.into()))
}

#[cfg(test)]
mod tests {
    use readitagain::orders::{OrderStatus, OrderStatusFilter};
    use readitagain_app::domain::orders::records::OrderUuid;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::{
        orders::models::fixtures::make_order,
        test_helpers::{Mocks, TEST_MEMBER_UUID},
    };

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        mocks.service(Router::with_path("customer/orders").get(handler))
    }

    #[tokio::test]
    async fn test_index_passes_status_filter() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .orders
            .expect_list_customer_orders()
            .once()
            .withf(|customer, filter| {
                *customer == TEST_MEMBER_UUID && *filter == OrderStatusFilter::Cancellation
            })
            .return_once(|_, _| Ok(vec![make_order(OrderUuid::new(), OrderStatus::Cancelling)]));

        let mut res = TestClient::get("http://example.com/customer/orders?status=cancellation")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: OrdersResponse = res.take_json().await?;

        assert_eq!(body.orders.len(), 1);
        assert_eq!(body.orders[0].status, "Cancelling");

        Ok(())
    }

    #[tokio::test]
    async fn test_index_without_filter_lists_all() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .orders
            .expect_list_customer_orders()
            .once()
            .withf(|_, filter| *filter == OrderStatusFilter::All)
            .return_once(|_, _| Ok(Vec::new()));

        let res = TestClient::get("http://example.com/customer/orders")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_index_with_unknown_filter_returns_400() -> TestResult {
        let res = TestClient::get("http://example.com/customer/orders?status=lost")
            .send(&make_service(Mocks::default()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
