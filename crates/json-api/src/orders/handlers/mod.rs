//! Order Handlers

pub(crate) mod advance;
pub(crate) mod cancel;
pub(crate) mod comment;
pub(crate) mod customer_index;
pub(crate) mod get;
pub(crate) mod reply;
pub(crate) mod seller_index;
