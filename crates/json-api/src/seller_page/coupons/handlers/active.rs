//! Set Coupon Active Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    extensions::*,
    seller_page::coupons::{errors::into_status_error, models::CouponResponse},
    state::State,
};

/// Set Coupon Active Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SetActiveRequest {
    pub is_active: bool,
}

/// Set Coupon Active Handler
///
/// Switches a coupon on or off for future checkouts. Applied coupons may be
/// switched too; placed orders keep their amounts.
#[endpoint(
    tags("seller"),
    summary = "Activate or Deactivate a Coupon",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    coupon: PathParam<Uuid>,
    json: JsonBody<SetActiveRequest>,
    depot: &mut Depot,
) -> Result<Json<CouponResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let seller = depot.member_uuid_or_401()?;

    let coupon = state
        .app
        .coupons
        .set_active(seller, coupon.into_inner().into(), json.into_inner().is_active)
        .await
        .map_err(into_status_error)?;

    Ok(Json(CouponResponse::at(coupon, Timestamp::now())))
}

#[cfg(test)]
mod tests {
    use readitagain::coupons::CouponKind;
    use readitagain_app::domain::coupons::records::CouponUuid;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::{
        seller_page::coupons::models::fixtures::make_coupon,
        test_helpers::{Mocks, TEST_MEMBER_UUID},
    };

    use super::*;

    #[tokio::test]
    async fn test_deactivate_returns_updated_coupon() -> TestResult {
        let mut mocks = Mocks::default();
        let uuid = CouponUuid::new();

        mocks
            .coupons
            .expect_set_active()
            .once()
            .withf(move |seller, coupon, is_active| {
                *seller == TEST_MEMBER_UUID && *coupon == uuid && !*is_active
            })
            .return_once(|_, _, is_active| {
                let mut coupon = make_coupon("SPRING", CouponKind::Seasoning, Timestamp::now());
                coupon.rules.is_active = is_active;

                Ok(coupon)
            });

        let service =
            mocks.service(Router::with_path("seller_page/coupon/{coupon}/active").post(handler));

        let mut res = TestClient::post(format!(
            "http://example.com/seller_page/coupon/{uuid}/active"
        ))
        .json(&SetActiveRequest { is_active: false })
        .send(&service)
        .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: CouponResponse = res.take_json().await?;

        assert!(!body.is_active, "expected the coupon to be inactive");

        Ok(())
    }
}
