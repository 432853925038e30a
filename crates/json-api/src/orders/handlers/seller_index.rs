//! Seller Orders Handler

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

/// Seller Orders Handler
///
/// Lists the orders placed for your books, newest first.
#[endpoint(tags("orders"), summary = "My Sales", security(("bearer_auth" = [])))]
pub(crate) async fn handler(
    status: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<OrdersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let seller = depot.member_uuid_or_401()?;

    let filter = parse_status_filter(status.into_inner())?;

    let orders = state
        .app
        .orders
        .list_seller_orders(seller, filter)
        .await
        .map_err(into_status_error)?;

    Ok(Json(orders.into()))
}

#[cfg(test)]
mod tests {
    use readitagain::orders::OrderStatusFilter;
    use salvo::test::TestClient;
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, TEST_MEMBER_UUID};

    use super::*;

    #[tokio::test]
    async fn test_index_lists_orders_to_ship() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .orders
            .expect_list_seller_orders()
            .once()
            .withf(|seller, filter| {
                *seller == TEST_MEMBER_UUID && *filter == OrderStatusFilter::ToShip
            })
            .return_once(|_, _| Ok(Vec::new()));

        let service = mocks.service(Router::with_path("seller/orders").get(handler));

        let res = TestClient::get("http://example.com/seller/orders?status=to_ship")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }
}
