//! Registration and login handlers

pub(crate) mod register;
pub(crate) mod token;
