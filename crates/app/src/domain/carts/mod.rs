//! Carts

pub mod data;
mod errors;
pub mod records;
pub(crate) mod repositories;
mod service;

pub use errors::CartsServiceError;
pub use service::*;
