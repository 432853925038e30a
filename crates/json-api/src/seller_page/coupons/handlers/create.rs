//! Create Coupon Handler

use std::sync::Arc;

use jiff::Timestamp;
use readitagain_app::domain::coupons::{data::NewCoupon, records::CouponUuid};
use salvo::{oapi::extract::JsonBody, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    seller_page::coupons::{
        errors::into_status_error,
        models::{CouponRequest, CouponResponse},
    },
    state::State,
};

/// Create Coupon Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateCouponRequest {
    #[serde(flatten)]
    pub terms: CouponRequest,

    /// Whether customers can use the coupon right away
    #[serde(default = "active_by_default")]
    pub is_active: bool,
}

fn active_by_default() -> bool {
    true
}

/// Create Coupon Handler
#[endpoint(
    tags("seller"),
    summary = "Create a Coupon",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Coupon created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid coupon terms"),
        (status_code = StatusCode::CONFLICT, description = "Coupon code already in use"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateCouponRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CouponResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let seller = depot.member_uuid_or_401()?;
    let request = json.into_inner();

    let coupon = NewCoupon {
        uuid: CouponUuid::new(),
        terms: request.terms.try_into()?,
        is_active: request.is_active,
    };

    let coupon = state
        .app
        .coupons
        .create_coupon(seller, coupon)
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(CouponResponse::at(coupon, Timestamp::now())))
}

#[cfg(test)]
mod tests {
    use readitagain::coupons::{CouponKind, CouponTermsError};
    use readitagain_app::domain::coupons::CouponsServiceError;
    use salvo::test::TestClient;
    use testresult::TestResult;

    use crate::{
        seller_page::coupons::models::fixtures::{make_coupon, make_request},
        test_helpers::{Mocks, TEST_MEMBER_UUID},
    };

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        mocks.service(Router::with_path("seller_page/coupon").post(handler))
    }

    #[tokio::test]
    async fn test_create_returns_201() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .coupons
            .expect_create_coupon()
            .once()
            .withf(|seller, coupon| {
                *seller == TEST_MEMBER_UUID
                    && coupon.terms.code == "SPRING"
                    && coupon.terms.kind == CouponKind::Seasoning
                    && coupon.is_active
            })
            .return_once(|_, coupon| {
                Ok(make_coupon(&coupon.terms.code, coupon.terms.kind, Timestamp::now()))
            });

        let res = TestClient::post("http://example.com/seller_page/coupon")
            .json(&CreateCouponRequest {
                terms: make_request("seasoning"),
                is_active: true,
            })
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_invalid_terms_returns_400() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .coupons
            .expect_create_coupon()
            .once()
            .return_once(|_, _| Err(CouponsServiceError::Terms(CouponTermsError::InvalidWindow)));

        let res = TestClient::post("http://example.com/seller_page/coupon")
            .json(&CreateCouponRequest {
                terms: make_request("shipping fee"),
                is_active: false,
            })
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_duplicate_code_returns_409() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .coupons
            .expect_create_coupon()
            .once()
            .return_once(|_, _| Err(CouponsServiceError::AlreadyExists));

        let res = TestClient::post("http://example.com/seller_page/coupon")
            .json(&CreateCouponRequest {
                terms: make_request("special event"),
                is_active: true,
            })
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
