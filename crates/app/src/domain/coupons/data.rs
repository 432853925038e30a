//! Coupon Data

use jiff::Timestamp;
use readitagain::coupons::{Coupon, CouponKind, CouponTermsError};
use rust_decimal::Decimal;

use crate::domain::coupons::records::CouponUuid;

/// Seller-editable coupon terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CouponTerms {
    pub code: String,
    pub name: String,
    pub kind: CouponKind,
    pub rate: Decimal,
    pub minimum: u64,
    pub start_at: Timestamp,
    pub end_at: Timestamp,
    pub description: String,
}

impl CouponTerms {
    /// Validate the terms as they would be stored.
    ///
    /// # Errors
    ///
    /// Returns the first rule the terms break.
    pub fn validate(&self) -> Result<(), CouponTermsError> {
        self.rules(true).validate()
    }

    fn rules(&self, is_active: bool) -> Coupon {
        Coupon {
            code: self.code.trim().to_string(),
            kind: self.kind,
            rate: self.rate,
            minimum: self.minimum,
            start_at: self.start_at,
            end_at: self.end_at,
            is_active,
        }
    }
}

/// New Coupon Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCoupon {
    pub uuid: CouponUuid,
    pub terms: CouponTerms,
    pub is_active: bool,
}
