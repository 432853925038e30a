//! Cart Handlers

pub(crate) mod add;
pub(crate) mod remove;
pub(crate) mod show_all;
pub(crate) mod show_seller;
