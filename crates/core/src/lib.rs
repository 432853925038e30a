//! ReadItAgain
//!
//! Marketplace rules for a secondhand-book store: shipping fees, coupon
//! classification and eligibility, checkout computation and the order status
//! state machine. Nothing in this crate performs I/O.

pub mod books;
pub mod checkout;
pub mod coupons;
pub mod discounts;
pub mod labels;
pub mod orders;
pub mod shipping;

pub mod prelude;
