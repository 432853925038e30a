//! Checkout
//!
//! Turns one seller's cart lines, a shipping method and the selected coupons
//! into the amounts persisted on an order.

use jiff::Timestamp;
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    coupons::{Coupon, CouponKind, NotApplicable},
    discounts::{DiscountError, SeasoningAdjustment},
    shipping::ShippingMethod,
};

/// A book line in the cart being checked out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutLine {
    /// Listed price.
    pub price: u64,

    /// Special-event code carried by the book, if any.
    pub discount_code: Option<String>,
}

/// Checkout amounts. Persisted verbatim on the order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSummary {
    /// Sum of the line prices.
    pub books_total: u64,

    /// Shipping fee after coupons.
    pub shipping_fee: u64,

    /// Amount taken off the books total.
    pub discount_amount: u64,

    /// `books_total + shipping_fee - discount_amount`.
    pub total: u64,

    /// Number of lines.
    pub total_count: u32,

    /// Codes of the coupons applied, in input order.
    pub coupon_codes: SmallVec<[String; 3]>,
}

/// Reasons a checkout cannot be computed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// Nothing to check out.
    #[error("cart has no books for this seller")]
    EmptyCart,

    /// More than one coupon of the same kind was selected.
    #[error("only one {0} coupon may be applied")]
    DuplicateCouponKind(CouponKind),

    /// A selected coupon cannot be used for this cart.
    #[error("coupon {code} cannot be applied: {reason}")]
    CouponNotApplicable {
        /// Coupon code.
        code: String,

        /// Why it was refused.
        reason: NotApplicable,
    },

    /// Amount arithmetic failed.
    #[error(transparent)]
    Discount(#[from] DiscountError),
}

/// Compute checkout amounts.
///
/// Coupons apply in input order. Seasoning coupons reduce the running books
/// total, shipping-fee coupons zero the fee and special-event coupons are
/// recorded without a separate reduction.
///
/// # Errors
///
/// Returns an error when the cart is empty, a coupon kind repeats, a coupon is
/// not applicable to these lines at `now`, or the amounts overflow.
pub fn compute_checkout<T: AsRef<Coupon>>(
    lines: &[CheckoutLine],
    shipping: ShippingMethod,
    coupons: &[T],
    now: Timestamp,
) -> Result<CheckoutSummary, CheckoutError> {
    if lines.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let books_total = lines.iter().try_fold(0_u64, |total, line| {
        total
            .checked_add(line.price)
            .ok_or(CheckoutError::Discount(DiscountError::Overflow))
    })?;

    let total_count =
        u32::try_from(lines.len()).map_err(|_overflow| DiscountError::Overflow)?;

    let mut seen: SmallVec<[CouponKind; 3]> = SmallVec::new();
    let mut coupon_codes = SmallVec::new();
    let mut shipping_fee = shipping.fee();
    let mut discount_amount = 0_u64;

    for coupon in coupons.iter().map(AsRef::as_ref) {
        if seen.contains(&coupon.kind) {
            return Err(CheckoutError::DuplicateCouponKind(coupon.kind));
        }

        seen.push(coupon.kind);

        check_applicable(coupon, lines, books_total, now).map_err(|reason| {
            CheckoutError::CouponNotApplicable {
                code: coupon.code.clone(),
                reason,
            }
        })?;

        match coupon.kind {
            CouponKind::Seasoning => {
                let running_total = books_total - discount_amount;
                let amount_off = SeasoningAdjustment::from_rate(coupon.rate)?
                    .amount_off(running_total)?;

                discount_amount += amount_off;
            }
            CouponKind::ShippingFee => shipping_fee = 0,
            CouponKind::SpecialEvent => {}
        }

        coupon_codes.push(coupon.code.clone());
    }

    let discount_amount = discount_amount.min(books_total);

    let total = (books_total - discount_amount)
        .checked_add(shipping_fee)
        .ok_or(DiscountError::Overflow)?;

    Ok(CheckoutSummary {
        books_total,
        shipping_fee,
        discount_amount,
        total,
        total_count,
        coupon_codes,
    })
}

fn check_applicable(
    coupon: &Coupon,
    lines: &[CheckoutLine],
    books_total: u64,
    now: Timestamp,
) -> Result<(), NotApplicable> {
    coupon.availability(now)?;

    match coupon.kind {
        CouponKind::SpecialEvent if !coupon.matches_any(lines) => {
            Err(NotApplicable::NoMatchingBook)
        }
        CouponKind::Seasoning | CouponKind::ShippingFee if !coupon.meets_minimum(books_total) => {
            Err(NotApplicable::BelowMinimum {
                minimum: coupon.minimum,
            })
        }
        _ => Ok(()),
    }
}
