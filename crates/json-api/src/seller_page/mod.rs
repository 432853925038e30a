//! Seller dashboard: listings and coupons

pub(crate) mod books;
pub(crate) mod coupons;
