//! Parsing errors for labelled enums.

use thiserror::Error;

/// A label that does not name any variant of `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownLabel {
    /// What was being parsed, e.g. `"order status"`.
    pub kind: &'static str,

    /// The rejected input.
    pub value: String,
}

impl UnknownLabel {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }
}
