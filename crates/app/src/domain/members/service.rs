//! Members service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::members::{
        data::ProfileUpdate,
        errors::MembersServiceError,
        records::{MemberRecord, MemberUuid},
        repository::PgMembersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgMembersService {
    db: Db,
    repository: PgMembersRepository,
}

impl PgMembersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgMembersRepository::new(),
        }
    }
}

#[async_trait]
impl MembersService for PgMembersService {
    async fn get_profile(&self, member: MemberUuid) -> Result<MemberRecord, MembersServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.repository.get_member(&mut tx, member).await?;

        tx.commit().await?;

        Ok(record)
    }

    #[tracing::instrument(
        name = "members.service.update_profile",
        skip(self, update),
        fields(member_uuid = %member),
        err
    )]
    async fn update_profile(
        &self,
        member: MemberUuid,
        update: ProfileUpdate,
    ) -> Result<MemberRecord, MembersServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self
            .repository
            .update_profile(&mut tx, member, &update)
            .await?;

        tx.commit().await?;

        info!(member_uuid = %member, "updated profile");

        Ok(record)
    }

    #[tracing::instrument(
        name = "members.service.set_avatar",
        skip(self),
        fields(member_uuid = %member),
        err
    )]
    async fn set_avatar(
        &self,
        member: MemberUuid,
        path: String,
    ) -> Result<MemberRecord, MembersServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.repository.set_avatar(&mut tx, member, &path).await?;

        tx.commit().await?;

        info!(member_uuid = %member, path = %path, "stored avatar");

        Ok(record)
    }
}

#[automock]
#[async_trait]
pub trait MembersService: Send + Sync {
    /// Retrieve the member's own profile.
    async fn get_profile(&self, member: MemberUuid) -> Result<MemberRecord, MembersServiceError>;

    /// Change display name, email and phone.
    async fn update_profile(
        &self,
        member: MemberUuid,
        update: ProfileUpdate,
    ) -> Result<MemberRecord, MembersServiceError>;

    /// Record the file name of a freshly uploaded avatar.
    async fn set_avatar(
        &self,
        member: MemberUuid,
        path: String,
    ) -> Result<MemberRecord, MembersServiceError>;
}
