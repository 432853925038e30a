//! Seller Book Handlers

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod index;
pub(crate) mod picture;
pub(crate) mod update;
