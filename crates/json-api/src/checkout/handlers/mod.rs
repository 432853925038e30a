//! Checkout Handlers

pub(crate) mod place_order;
pub(crate) mod preview;
pub(crate) mod select_coupon;
