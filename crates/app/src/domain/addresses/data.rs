//! Address Data

use crate::domain::addresses::records::AddressUuid;

/// New Address Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAddress {
    pub uuid: AddressUuid,
    pub recipient: String,
    pub phone: String,
    pub location: String,
}
