//! ReadItAgain Domain Concerns

pub mod addresses;
pub mod books;
pub mod carts;
pub mod checkout;
pub mod coupons;
pub mod members;
pub mod orders;

pub(crate) mod rows;
