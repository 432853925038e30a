//! Shipping methods and their fixed fees.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use thiserror::Error;

/// A shipping label that is not one of the known methods.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown shipping method: {0}")]
pub struct UnknownShippingMethod(pub String);

/// Supported shipping methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShippingMethod {
    /// Pick up at a 7-ELEVEN store.
    SevenEleven,

    /// Pick up at a FamilyMart store.
    FamilyMart,

    /// Pick up at a Hi-Life store.
    HiLife,

    /// Door-to-door delivery.
    HomeDelivery,
}

impl ShippingMethod {
    /// All known methods, in display order.
    pub const ALL: [Self; 4] = [
        Self::SevenEleven,
        Self::FamilyMart,
        Self::HiLife,
        Self::HomeDelivery,
    ];

    /// Canonical label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::SevenEleven => "7-ELEVEN",
            Self::FamilyMart => "FamilyMart",
            Self::HiLife => "Hi-Life",
            Self::HomeDelivery => "Home Delivery",
        }
    }

    /// Fee charged for this method, in whole currency units.
    pub const fn fee(self) -> u64 {
        match self {
            Self::SevenEleven | Self::FamilyMart | Self::HiLife => 60,
            Self::HomeDelivery => 120,
        }
    }
}

impl fmt::Display for ShippingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ShippingMethod {
    type Err = UnknownShippingMethod;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|method| method.label() == label.trim())
            .ok_or_else(|| UnknownShippingMethod(label.to_owned()))
    }
}

impl Serialize for ShippingMethod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for ShippingMethod {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;

        label.parse().map_err(de::Error::custom)
    }
}
