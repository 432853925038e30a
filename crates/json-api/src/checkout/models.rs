//! Checkout request and response models

use jiff::Timestamp;
use readitagain::{
    checkout::CheckoutSummary,
    coupons::{CouponEligibility, EligibleCoupon},
    shipping::ShippingMethod,
};
use readitagain_app::domain::{
    checkout::{data::CheckoutSelection, records::CheckoutPreview},
    coupons::records::CouponRecord,
};
use salvo::{oapi::ToSchema, prelude::StatusError};
use serde::{Deserialize, Serialize};

use crate::{
    carts::models::SellerCartResponse, extensions::*,
    seller_page::coupons::models::CouponResponse,
};

/// Checkout Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckoutRequest {
    /// `7-ELEVEN`, `FamilyMart`, `Hi-Life` or `Home Delivery`
    pub shipping_method: String,

    /// Applied in the given order, at most one per kind
    #[serde(default)]
    pub coupon_codes: Vec<String>,
}

impl TryFrom<CheckoutRequest> for CheckoutSelection {
    type Error = StatusError;

    fn try_from(request: CheckoutRequest) -> Result<Self, Self::Error> {
        Ok(CheckoutSelection {
            shipping_method: request
                .shipping_method
                .parse::<ShippingMethod>()
                .or_400("Invalid shipping method")?,
            coupon_codes: request.coupon_codes,
        })
    }
}

/// Eligible Coupon Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct EligibleCouponResponse {
    pub coupon: CouponResponse,

    /// Whether the cart meets the coupon's minimum right now
    pub usable: bool,
}

fn bucket(
    coupons: Vec<EligibleCoupon<CouponRecord>>,
    now: Timestamp,
) -> Vec<EligibleCouponResponse> {
    coupons
        .into_iter()
        .map(|eligible| EligibleCouponResponse {
            coupon: CouponResponse::at(eligible.coupon, now),
            usable: eligible.usable,
        })
        .collect()
}

/// Coupon Selection Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CouponSelectionResponse {
    pub special_event: Vec<EligibleCouponResponse>,
    pub seasoning: Vec<EligibleCouponResponse>,
    pub shipping_fee: Vec<EligibleCouponResponse>,
}

impl CouponSelectionResponse {
    pub(crate) fn at(eligibility: CouponEligibility<CouponRecord>, now: Timestamp) -> Self {
        Self {
            special_event: bucket(eligibility.special_event, now),
            seasoning: bucket(eligibility.seasoning, now),
            shipping_fee: bucket(eligibility.shipping_fee, now),
        }
    }
}

/// Checkout Summary Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SummaryResponse {
    pub books_total: u64,
    pub shipping_fee: u64,
    pub discount_amount: u64,
    pub total: u64,
    pub total_count: u32,
    pub coupon_codes: Vec<String>,
}

impl From<CheckoutSummary> for SummaryResponse {
    fn from(summary: CheckoutSummary) -> Self {
        Self {
            books_total: summary.books_total,
            shipping_fee: summary.shipping_fee,
            discount_amount: summary.discount_amount,
            total: summary.total,
            total_count: summary.total_count,
            coupon_codes: summary.coupon_codes.into_vec(),
        }
    }
}

/// Checkout Preview Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PreviewResponse {
    pub cart: SellerCartResponse,
    pub summary: SummaryResponse,
}

impl From<CheckoutPreview> for PreviewResponse {
    fn from(preview: CheckoutPreview) -> Self {
        Self {
            cart: preview.cart.into(),
            summary: preview.summary.into(),
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub(crate) fn make_request(shipping_method: &str, codes: &[&str]) -> CheckoutRequest {
        CheckoutRequest {
            shipping_method: shipping_method.to_string(),
            coupon_codes: codes.iter().map(ToString::to_string).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::{fixtures::make_request, *};

    #[test]
    fn request_parses_shipping_label() -> TestResult {
        let selection = CheckoutSelection::try_from(make_request("Hi-Life", &["SPRING"]))?;

        assert_eq!(selection.shipping_method, ShippingMethod::HiLife);
        assert_eq!(selection.coupon_codes, vec!["SPRING".to_string()]);

        Ok(())
    }

    #[test]
    fn unknown_shipping_label_is_rejected() {
        let result = CheckoutSelection::try_from(make_request("carrier pigeon", &[]));

        assert!(result.is_err(), "unknown shipping method should be rejected");
    }
}
