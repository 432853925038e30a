//! Coupon Records

use jiff::Timestamp;
use readitagain::coupons::Coupon;

use crate::{domain::members::records::MemberUuid, uuids::TypedUuid};

/// Coupon UUID
pub type CouponUuid = TypedUuid<CouponRecord>;

/// Coupon Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CouponRecord {
    pub uuid: CouponUuid,
    pub seller_uuid: MemberUuid,
    pub name: String,
    pub description: String,

    /// Fields the checkout rules look at.
    pub rules: Coupon,

    /// Whether a placed order used this coupon or holds a book carrying its
    /// code. Applied coupons are frozen.
    pub applied: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl AsRef<Coupon> for CouponRecord {
    fn as_ref(&self) -> &Coupon {
        &self.rules
    }
}
