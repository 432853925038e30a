//! Addresses service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        addresses::{
            data::NewAddress,
            errors::AddressesServiceError,
            records::{AddressRecord, AddressUuid},
            repository::PgAddressesRepository,
        },
        members::records::MemberUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgAddressesService {
    db: Db,
    repository: PgAddressesRepository,
}

impl PgAddressesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgAddressesRepository::new(),
        }
    }
}

#[async_trait]
impl AddressesService for PgAddressesService {
    async fn list_addresses(
        &self,
        member: MemberUuid,
    ) -> Result<Vec<AddressRecord>, AddressesServiceError> {
        let mut tx = self.db.begin().await?;

        let addresses = self.repository.list_addresses(&mut tx, member).await?;

        tx.commit().await?;

        Ok(addresses)
    }

    #[tracing::instrument(
        name = "addresses.service.create_address",
        skip(self, address),
        fields(member_uuid = %member, address_uuid = %address.uuid),
        err
    )]
    async fn create_address(
        &self,
        member: MemberUuid,
        address: NewAddress,
    ) -> Result<AddressRecord, AddressesServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self
            .repository
            .create_address(&mut tx, member, &address)
            .await?;

        tx.commit().await?;

        info!(address_uuid = %record.uuid, "created address");

        Ok(record)
    }

    #[tracing::instrument(
        name = "addresses.service.delete_address",
        skip(self),
        fields(member_uuid = %member, address_uuid = %address),
        err
    )]
    async fn delete_address(
        &self,
        member: MemberUuid,
        address: AddressUuid,
    ) -> Result<(), AddressesServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .repository
            .delete_address(&mut tx, member, address)
            .await?;

        if rows_affected == 0 {
            return Err(AddressesServiceError::NotFound);
        }

        tx.commit().await?;

        info!(address_uuid = %address, "deleted address");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait AddressesService: Send + Sync {
    /// List the member's shipping addresses, oldest first.
    async fn list_addresses(
        &self,
        member: MemberUuid,
    ) -> Result<Vec<AddressRecord>, AddressesServiceError>;

    /// Add a shipping address.
    async fn create_address(
        &self,
        member: MemberUuid,
        address: NewAddress,
    ) -> Result<AddressRecord, AddressesServiceError>;

    /// Delete one of the member's own addresses.
    async fn delete_address(
        &self,
        member: MemberUuid,
        address: AddressUuid,
    ) -> Result<(), AddressesServiceError>;
}
