//! Delete Coupon Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, seller_page::coupons::errors::into_status_error, state::State};

/// Delete Coupon Handler
#[endpoint(
    tags("seller"),
    summary = "Delete a Coupon",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Coupon deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Coupon not found"),
        (status_code = StatusCode::CONFLICT, description = "Coupon referenced by an order"),
    ),
)]
pub(crate) async fn handler(
    coupon: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let seller = depot.member_uuid_or_401()?;

    state
        .app
        .coupons
        .delete_coupon(seller, coupon.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use readitagain_app::domain::coupons::{CouponsServiceError, records::CouponUuid};
    use salvo::test::TestClient;
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, TEST_MEMBER_UUID};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        mocks.service(Router::with_path("seller_page/coupon/{coupon}").delete(handler))
    }

    #[tokio::test]
    async fn test_delete_returns_204() -> TestResult {
        let mut mocks = Mocks::default();
        let uuid = CouponUuid::new();

        mocks
            .coupons
            .expect_delete_coupon()
            .once()
            .withf(move |seller, coupon| *seller == TEST_MEMBER_UUID && *coupon == uuid)
            .return_once(|_, _| Ok(()));

        let res = TestClient::delete(format!("http://example.com/seller_page/coupon/{uuid}"))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_applied_coupon_returns_409() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .coupons
            .expect_delete_coupon()
            .once()
            .return_once(|_, _| Err(CouponsServiceError::Frozen));

        let res = TestClient::delete(format!(
            "http://example.com/seller_page/coupon/{}",
            Uuid::now_v7()
        ))
        .send(&make_service(mocks))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
