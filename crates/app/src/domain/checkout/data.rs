//! Checkout Data

use readitagain::shipping::ShippingMethod;

/// What the customer picked at checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSelection {
    pub shipping_method: ShippingMethod,

    /// Coupon codes in the order they should apply.
    pub coupon_codes: Vec<String>,
}

impl CheckoutSelection {
    /// Selected codes with surrounding whitespace removed.
    pub(crate) fn codes(&self) -> Vec<String> {
        self.coupon_codes
            .iter()
            .map(|code| code.trim().to_owned())
            .collect()
    }
}
