//! Members Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};
use uuid::Uuid;

use crate::domain::{
    members::{
        data::ProfileUpdate,
        records::{MemberRecord, MemberUuid},
    },
    rows::try_get_timestamp,
};

const GET_MEMBER_SQL: &str = include_str!("sql/get_member.sql");
const UPDATE_PROFILE_SQL: &str = include_str!("sql/update_profile.sql");
const SET_AVATAR_SQL: &str = include_str!("sql/set_avatar.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgMembersRepository;

impl PgMembersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_member(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        member: MemberUuid,
    ) -> Result<MemberRecord, sqlx::Error> {
        query_as::<Postgres, MemberRecord>(GET_MEMBER_SQL)
            .bind(member.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_profile(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        member: MemberUuid,
        update: &ProfileUpdate,
    ) -> Result<MemberRecord, sqlx::Error> {
        query_as::<Postgres, MemberRecord>(UPDATE_PROFILE_SQL)
            .bind(member.into_uuid())
            .bind(&update.display_name)
            .bind(&update.email)
            .bind(update.phone.as_deref())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn set_avatar(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        member: MemberUuid,
        path: &str,
    ) -> Result<MemberRecord, sqlx::Error> {
        query_as::<Postgres, MemberRecord>(SET_AVATAR_SQL)
            .bind(member.into_uuid())
            .bind(path)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for MemberRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get::<Uuid, _>("uuid")?.into(),
            username: row.try_get("username")?,
            email: row.try_get("email")?,
            display_name: row.try_get("display_name")?,
            phone: row.try_get("phone")?,
            avatar_path: row.try_get("avatar_path")?,
            created_at: try_get_timestamp(row, "created_at")?,
            updated_at: try_get_timestamp(row, "updated_at")?,
        })
    }
}
