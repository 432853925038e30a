//! Coupon request and response models

use jiff::Timestamp;
use readitagain::coupons::{CouponKind, CouponPhase};
use readitagain_app::domain::coupons::{data::CouponTerms, records::CouponRecord};
use rust_decimal::Decimal;
use salvo::{oapi::ToSchema, prelude::StatusError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::extensions::*;

/// Coupon Terms Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CouponRequest {
    /// Up to 20 characters, unique across the store
    pub code: String,
    pub name: String,

    /// `special event`, `seasoning` or `shipping fee`
    pub kind: String,

    /// Seasoning: a flat amount when at least 1, otherwise a fraction of the total
    #[salvo(schema(value_type = String))]
    pub rate: Decimal,

    /// Minimum books total for seasoning and shipping-fee coupons
    #[serde(default)]
    pub minimum: u64,

    /// RFC 3339 timestamp
    pub start_at: String,

    /// RFC 3339 timestamp
    pub end_at: String,

    #[serde(default)]
    pub description: String,
}

impl TryFrom<CouponRequest> for CouponTerms {
    type Error = StatusError;

    fn try_from(request: CouponRequest) -> Result<Self, Self::Error> {
        Ok(CouponTerms {
            code: request.code.trim().to_string(),
            name: request.name.trim().to_string(),
            kind: request
                .kind
                .parse::<CouponKind>()
                .or_400("Invalid coupon kind")?,
            rate: request.rate,
            minimum: request.minimum,
            start_at: request
                .start_at
                .parse::<Timestamp>()
                .or_400("Invalid start_at")?,
            end_at: request.end_at.parse::<Timestamp>().or_400("Invalid end_at")?,
            description: request.description,
        })
    }
}

/// Coupon Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CouponResponse {
    pub uuid: Uuid,
    pub code: String,
    pub name: String,
    pub kind: String,
    #[salvo(schema(value_type = String))]
    pub rate: Decimal,
    pub minimum: u64,
    pub start_at: String,
    pub end_at: String,
    pub is_active: bool,

    /// `upcoming`, `ongoing` or `expired`
    pub phase: String,

    /// Applied coupons can no longer be edited or deleted
    pub applied: bool,
    pub description: String,
}

impl CouponResponse {
    pub(crate) fn at(coupon: CouponRecord, now: Timestamp) -> Self {
        let phase = match coupon.rules.phase(now) {
            CouponPhase::Upcoming => "upcoming",
            CouponPhase::Ongoing => "ongoing",
            CouponPhase::Expired => "expired",
        };

        Self {
            uuid: coupon.uuid.into(),
            phase: phase.to_string(),
            kind: coupon.rules.kind.label().to_string(),
            rate: coupon.rules.rate,
            minimum: coupon.rules.minimum,
            start_at: coupon.rules.start_at.to_string(),
            end_at: coupon.rules.end_at.to_string(),
            is_active: coupon.rules.is_active,
            code: coupon.rules.code,
            name: coupon.name,
            applied: coupon.applied,
            description: coupon.description,
        }
    }
}

/// Coupons Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CouponsResponse {
    pub coupons: Vec<CouponResponse>,
}


#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::{fixtures::make_request, *};

    #[test]
    fn request_converts_to_terms() -> TestResult {
        let terms = CouponTerms::try_from(make_request("seasoning"))?;

        assert_eq!(terms.code, "SPRING");
        assert_eq!(terms.kind, CouponKind::Seasoning);
        assert_eq!(terms.start_at, "2026-03-01T00:00:00Z".parse::<Timestamp>()?);

        Ok(())
    }

    #[test]
    fn bad_kind_or_timestamp_is_rejected() {
        assert!(
            CouponTerms::try_from(make_request("loyalty")).is_err(),
            "unknown kinds should not convert"
        );

        let mut request = make_request("seasoning");
        request.end_at = "next tuesday".to_string();

        assert!(
            CouponTerms::try_from(request).is_err(),
            "unparseable timestamps should not convert"
        );
    }
}
