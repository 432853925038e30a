//! Member Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Member UUID
pub type MemberUuid = TypedUuid<MemberRecord>;

/// Member Record
///
/// A member lists books as a seller and places orders as a customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberRecord {
    pub uuid: MemberUuid,
    pub username: String,
    pub email: String,
    pub display_name: String,
    pub phone: Option<String>,
    pub avatar_path: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
