//! Seller Books

mod handlers;
mod models;

pub(crate) use handlers::*;
