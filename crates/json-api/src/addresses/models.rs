//! Address request and response models

use readitagain_app::domain::addresses::{
    data::NewAddress,
    records::{AddressRecord, AddressUuid},
};
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Address Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddressRequest {
    pub recipient: String,
    pub phone: String,
    pub location: String,
}

impl From<AddressRequest> for NewAddress {
    fn from(request: AddressRequest) -> Self {
        NewAddress {
            uuid: AddressUuid::new(),
            recipient: request.recipient.trim().to_string(),
            phone: request.phone.trim().to_string(),
            location: request.location.trim().to_string(),
        }
    }
}

/// Address Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddressResponse {
    pub uuid: Uuid,
    pub recipient: String,
    pub phone: String,
    pub location: String,
    pub created_at: String,
}

impl From<AddressRecord> for AddressResponse {
    fn from(address: AddressRecord) -> Self {
        Self {
            uuid: address.uuid.into(),
            recipient: address.recipient,
            phone: address.phone,
            location: address.location,
            created_at: address.created_at.to_string(),
        }
    }
}

/// Addresses Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddressesResponse {
    pub addresses: Vec<AddressResponse>,
}
