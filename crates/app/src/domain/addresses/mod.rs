//! Addresses

pub mod data;
mod errors;
pub mod records;
mod repository;
mod service;

pub use errors::AddressesServiceError;
pub use service::*;
