//! Profile request and response models

use readitagain_app::domain::members::{data::ProfileUpdate, records::MemberRecord};
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Profile Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProfileResponse {
    pub uuid: Uuid,
    pub username: String,
    pub email: String,
    pub display_name: String,
    pub phone: Option<String>,

    /// File name, served from `/images/{file}?type=avatar`
    pub avatar: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<MemberRecord> for ProfileResponse {
    fn from(member: MemberRecord) -> Self {
        Self {
            uuid: member.uuid.into(),
            username: member.username,
            email: member.email,
            display_name: member.display_name,
            phone: member.phone,
            avatar: member.avatar_path,
            created_at: member.created_at.to_string(),
            updated_at: member.updated_at.to_string(),
        }
    }
}

/// Profile Update Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProfileRequest {
    pub display_name: String,
    pub email: String,
    pub phone: Option<String>,
}

impl From<ProfileRequest> for ProfileUpdate {
    fn from(request: ProfileRequest) -> Self {
        ProfileUpdate {
            display_name: request.display_name.trim().to_string(),
            email: request.email.trim().to_string(),
            phone: request
                .phone
                .map(|phone| phone.trim().to_string())
                .filter(|phone| !phone.is_empty()),
        }
    }
}
