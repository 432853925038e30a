//! Address Records

use jiff::Timestamp;

use crate::{domain::members::records::MemberUuid, uuids::TypedUuid};

/// Address UUID
pub type AddressUuid = TypedUuid<AddressRecord>;

/// Address Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressRecord {
    pub uuid: AddressUuid,
    pub member_uuid: MemberUuid,
    pub recipient: String,
    pub phone: String,
    pub location: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
