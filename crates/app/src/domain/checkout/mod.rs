//! Checkout

pub mod data;
mod errors;
pub mod records;
mod repository;
mod service;

pub use errors::CheckoutServiceError;
pub use service::*;
