//! Profile Handlers

pub(crate) mod avatar;
pub(crate) mod get;
pub(crate) mod update;
