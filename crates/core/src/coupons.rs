//! Coupons
//!
//! Seller-issued price adjustments. A coupon has a kind, a rate, a minimum cart
//! total and a validity window, and can be switched off by its seller.

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{checkout::CheckoutLine, labels::UnknownLabel};

/// Longest accepted coupon code.
pub const MAX_CODE_LEN: usize = 20;

/// Coupon kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CouponKind {
    /// Tied to specific books through their discount code.
    #[serde(rename = "special event")]
    SpecialEvent,

    /// Percentage or flat discount above a minimum cart total.
    #[serde(rename = "seasoning")]
    Seasoning,

    /// Waives the shipping fee above a minimum cart total.
    #[serde(rename = "shipping fee")]
    ShippingFee,
}

impl CouponKind {
    /// Canonical label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::SpecialEvent => "special event",
            Self::Seasoning => "seasoning",
            Self::ShippingFee => "shipping fee",
        }
    }
}

impl fmt::Display for CouponKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CouponKind {
    type Err = UnknownLabel;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "special event" => Ok(Self::SpecialEvent),
            "seasoning" => Ok(Self::Seasoning),
            "shipping fee" => Ok(Self::ShippingFee),
            _ => Err(UnknownLabel::new("coupon kind", value)),
        }
    }
}

/// Where `now` falls relative to a coupon's validity window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CouponPhase {
    /// The window has not opened yet.
    Upcoming,

    /// The window is open (both ends inclusive).
    Ongoing,

    /// The window has closed.
    Expired,
}

impl CouponPhase {
    /// Classify `now` against `[start_at, end_at]`.
    pub fn at(start_at: Timestamp, end_at: Timestamp, now: Timestamp) -> Self {
        if now < start_at {
            Self::Upcoming
        } else if now > end_at {
            Self::Expired
        } else {
            Self::Ongoing
        }
    }
}

/// Seller dashboard coupon filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PhaseFilter {
    /// Every coupon.
    #[default]
    All,

    /// Only coupons in the given phase.
    Only(CouponPhase),
}

impl PhaseFilter {
    /// Whether a coupon in `phase` passes the filter.
    pub fn matches(self, phase: CouponPhase) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == phase,
        }
    }
}

impl FromStr for PhaseFilter {
    type Err = UnknownLabel;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "upcoming" => Ok(Self::Only(CouponPhase::Upcoming)),
            "ongoing" => Ok(Self::Only(CouponPhase::Ongoing)),
            "expired" => Ok(Self::Only(CouponPhase::Expired)),
            _ => Err(UnknownLabel::new("coupon phase", value)),
        }
    }
}

/// Why a coupon cannot be used right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NotApplicable {
    /// Switched off by the seller.
    #[error("coupon is inactive")]
    Inactive,

    /// Validity window has not opened.
    #[error("coupon is not yet valid")]
    Upcoming,

    /// Validity window has closed.
    #[error("coupon has expired")]
    Expired,

    /// Cart total is below the coupon's minimum.
    #[error("cart total is below the coupon minimum of {minimum}")]
    BelowMinimum {
        /// Required cart total.
        minimum: u64,
    },

    /// No book in the cart carries this special-event code.
    #[error("no book in the cart carries this coupon code")]
    NoMatchingBook,

    /// The seller has no coupon with this code.
    #[error("seller has no coupon with this code")]
    Unknown,
}

/// Coupon terms that fail validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CouponTermsError {
    /// Code was empty or whitespace.
    #[error("coupon code must not be empty")]
    EmptyCode,

    /// Code exceeds [`MAX_CODE_LEN`] characters.
    #[error("coupon code must be at most {MAX_CODE_LEN} characters")]
    CodeTooLong,

    /// Negative rate.
    #[error("coupon rate must not be negative")]
    NegativeRate,

    /// A seasoning coupon with nothing to take off.
    #[error("seasoning coupons need a rate above zero")]
    ZeroSeasoningRate,

    /// Window ends before (or when) it starts.
    #[error("coupon must end after it starts")]
    InvalidWindow,
}

/// The rule-relevant fields of a coupon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coupon {
    /// Unique code customers select at checkout.
    pub code: String,

    /// Coupon kind.
    pub kind: CouponKind,

    /// Seasoning: flat amount when `>= 1`, fraction of the total otherwise.
    pub rate: Decimal,

    /// Minimum cart total for seasoning and shipping-fee coupons.
    pub minimum: u64,

    /// Start of the validity window.
    pub start_at: Timestamp,

    /// End of the validity window.
    pub end_at: Timestamp,

    /// Seller switch.
    pub is_active: bool,
}

impl AsRef<Coupon> for Coupon {
    fn as_ref(&self) -> &Coupon {
        self
    }
}

impl Coupon {
    /// Phase of this coupon at `now`.
    pub fn phase(&self, now: Timestamp) -> CouponPhase {
        CouponPhase::at(self.start_at, self.end_at, now)
    }

    /// Check the coupon is active and inside its window.
    ///
    /// # Errors
    ///
    /// Returns the first reason the coupon is unavailable.
    pub fn availability(&self, now: Timestamp) -> Result<(), NotApplicable> {
        if !self.is_active {
            return Err(NotApplicable::Inactive);
        }

        match self.phase(now) {
            CouponPhase::Ongoing => Ok(()),
            CouponPhase::Upcoming => Err(NotApplicable::Upcoming),
            CouponPhase::Expired => Err(NotApplicable::Expired),
        }
    }

    /// True when the coupon is active and inside its window.
    pub fn is_redeemable(&self, now: Timestamp) -> bool {
        self.availability(now).is_ok()
    }

    /// Whether `books_total` meets the coupon's minimum.
    pub fn meets_minimum(&self, books_total: u64) -> bool {
        books_total >= self.minimum
    }

    /// Whether any cart line carries this coupon's code.
    pub fn matches_any(&self, lines: &[CheckoutLine]) -> bool {
        lines
            .iter()
            .any(|line| line.discount_code.as_deref() == Some(self.code.as_str()))
    }

    /// Validate coupon terms before they are stored.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule.
    pub fn validate(&self) -> Result<(), CouponTermsError> {
        let code = self.code.trim();

        if code.is_empty() {
            return Err(CouponTermsError::EmptyCode);
        }

        if code.chars().count() > MAX_CODE_LEN {
            return Err(CouponTermsError::CodeTooLong);
        }

        if self.rate < Decimal::ZERO {
            return Err(CouponTermsError::NegativeRate);
        }

        if self.kind == CouponKind::Seasoning && self.rate.is_zero() {
            return Err(CouponTermsError::ZeroSeasoningRate);
        }

        if self.end_at <= self.start_at {
            return Err(CouponTermsError::InvalidWindow);
        }

        Ok(())
    }
}

/// A coupon offered at checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EligibleCoupon<T> {
    /// The coupon.
    pub coupon: T,

    /// Whether the cart currently satisfies the coupon's minimum.
    pub usable: bool,
}

/// Coupons a customer may pick from, grouped by kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CouponEligibility<T> {
    /// Special-event coupons whose code matches a book in the cart.
    pub special_event: Vec<EligibleCoupon<T>>,

    /// Seasoning coupons.
    pub seasoning: Vec<EligibleCoupon<T>>,

    /// Shipping-fee coupons.
    pub shipping_fee: Vec<EligibleCoupon<T>>,
}

impl<T> Default for CouponEligibility<T> {
    fn default() -> Self {
        Self {
            special_event: Vec::new(),
            seasoning: Vec::new(),
            shipping_fee: Vec::new(),
        }
    }
}

/// Sort a seller's coupons into checkout buckets for the given cart lines.
///
/// Inactive, upcoming and expired coupons are left out entirely. Special-event
/// coupons only appear when a line carries their code.
pub fn eligible_coupons<T, I>(
    coupons: I,
    lines: &[CheckoutLine],
    now: Timestamp,
) -> CouponEligibility<T>
where
    T: AsRef<Coupon>,
    I: IntoIterator<Item = T>,
{
    let books_total = lines
        .iter()
        .fold(0_u64, |total, line| total.saturating_add(line.price));

    let mut eligibility = CouponEligibility::default();

    for item in coupons {
        let coupon = item.as_ref();

        if !coupon.is_redeemable(now) {
            continue;
        }

        match coupon.kind {
            CouponKind::SpecialEvent => {
                if coupon.matches_any(lines) {
                    eligibility.special_event.push(EligibleCoupon {
                        coupon: item,
                        usable: true,
                    });
                }
            }
            CouponKind::Seasoning => {
                let usable = coupon.meets_minimum(books_total);

                eligibility
                    .seasoning
                    .push(EligibleCoupon { coupon: item, usable });
            }
            CouponKind::ShippingFee => {
                let usable = coupon.meets_minimum(books_total);

                eligibility
                    .shipping_fee
                    .push(EligibleCoupon { coupon: item, usable });
            }
        }
    }

    eligibility
}
