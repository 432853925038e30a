//! Prelude

pub use crate::{
    books::{BookFilter, BookState},
    checkout::{CheckoutError, CheckoutLine, CheckoutSummary, compute_checkout},
    coupons::{
        Coupon, CouponEligibility, CouponKind, CouponPhase, CouponTermsError, EligibleCoupon,
        NotApplicable, PhaseFilter, eligible_coupons,
    },
    discounts::{DiscountError, SeasoningAdjustment},
    labels::UnknownLabel,
    orders::{
        CancellationReply, OrderStatus, OrderStatusError, OrderStatusFilter, Party,
        PendingCancellation, Stars, resolve_cancellation,
    },
    shipping::{ShippingMethod, UnknownShippingMethod},
};
