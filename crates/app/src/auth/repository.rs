//! Auth repository.

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};
use uuid::Uuid;

use crate::{
    auth::models::{Credentials, NewMember},
    domain::members::records::{MemberRecord, MemberUuid},
};

const CREATE_MEMBER_SQL: &str = include_str!("sql/create_member.sql");
const FIND_CREDENTIALS_SQL: &str = include_str!("sql/find_credentials.sql");
const MEMBER_EXISTS_SQL: &str = include_str!("sql/member_exists.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgAuthRepository;

impl PgAuthRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_member(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        member: &NewMember,
        password_hash: &str,
    ) -> Result<MemberRecord, sqlx::Error> {
        query_as::<Postgres, MemberRecord>(CREATE_MEMBER_SQL)
            .bind(member.uuid.into_uuid())
            .bind(&member.username)
            .bind(&member.email)
            .bind(password_hash)
            .bind(member.display_name())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_credentials(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        username: &str,
    ) -> Result<Option<Credentials>, sqlx::Error> {
        query_as::<Postgres, Credentials>(FIND_CREDENTIALS_SQL)
            .bind(username)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn member_exists(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        member: MemberUuid,
    ) -> Result<bool, sqlx::Error> {
        query_scalar::<Postgres, bool>(MEMBER_EXISTS_SQL)
            .bind(member.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for Credentials {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get::<Uuid, _>("uuid")?.into(),
            password_hash: row.try_get("password_hash")?,
        })
    }
}
