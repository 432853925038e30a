//! Public Book Handlers

pub(crate) mod get;
pub(crate) mod search;
