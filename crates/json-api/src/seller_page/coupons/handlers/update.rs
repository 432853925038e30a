//! Update Coupon Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use crate::{
    extensions::*,
    seller_page::coupons::{
        errors::into_status_error,
        models::{CouponRequest, CouponResponse},
    },
    state::State,
};

/// Update Coupon Handler
///
/// Replaces the terms of a coupon no order has used yet.
#[endpoint(
    tags("seller"),
    summary = "Edit a Coupon",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Coupon updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Coupon not found"),
        (status_code = StatusCode::CONFLICT, description = "Coupon referenced by an order"),
    ),
)]
pub(crate) async fn handler(
    coupon: PathParam<Uuid>,
    json: JsonBody<CouponRequest>,
    depot: &mut Depot,
) -> Result<Json<CouponResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let seller = depot.member_uuid_or_401()?;

    let coupon = state
        .app
        .coupons
        .update_coupon(seller, coupon.into_inner().into(), json.into_inner().try_into()?)
        .await
        .map_err(into_status_error)?;

    Ok(Json(CouponResponse::at(coupon, Timestamp::now())))
}

#[cfg(test)]
mod tests {
    use readitagain::coupons::CouponKind;
    use readitagain_app::domain::coupons::{CouponsServiceError, records::CouponUuid};
    use salvo::test::TestClient;
    use testresult::TestResult;

    use crate::{
        seller_page::coupons::models::fixtures::{make_coupon, make_request},
        test_helpers::{Mocks, TEST_MEMBER_UUID},
    };

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        mocks.service(Router::with_path("seller_page/coupon/{coupon}").put(handler))
    }

    #[tokio::test]
    async fn test_update_returns_200() -> TestResult {
        let mut mocks = Mocks::default();
        let uuid = CouponUuid::new();

        mocks
            .coupons
            .expect_update_coupon()
            .once()
            .withf(move |seller, coupon, terms| {
                *seller == TEST_MEMBER_UUID && *coupon == uuid && terms.minimum == 500
            })
            .return_once(|_, _, terms| Ok(make_coupon(&terms.code, terms.kind, Timestamp::now())));

        let res = TestClient::put(format!("http://example.com/seller_page/coupon/{uuid}"))
            .json(&make_request("seasoning"))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_applied_coupon_returns_409() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .coupons
            .expect_update_coupon()
            .once()
            .return_once(|_, _, _| Err(CouponsServiceError::Frozen));

        let res = TestClient::put(format!(
            "http://example.com/seller_page/coupon/{}",
            Uuid::now_v7()
        ))
        .json(&make_request(CouponKind::ShippingFee.label()))
        .send(&make_service(mocks))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
