//! Coupons Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use readitagain::coupons::Coupon;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::domain::{
    coupons::{
        data::CouponTerms,
        records::{CouponRecord, CouponUuid},
    },
    members::records::MemberUuid,
    rows::{amount_param, try_get_amount, try_get_label, try_get_timestamp},
};

const LIST_SELLER_COUPONS_SQL: &str = include_str!("sql/list_seller_coupons.sql");
const GET_SELLER_COUPON_FOR_UPDATE_SQL: &str = include_str!("sql/get_seller_coupon_for_update.sql");
const LOCK_SELLER_COUPONS_BY_CODE_SQL: &str = include_str!("sql/lock_seller_coupons_by_code.sql");
const CREATE_COUPON_SQL: &str = include_str!("sql/create_coupon.sql");
const UPDATE_COUPON_SQL: &str = include_str!("sql/update_coupon.sql");
const SET_COUPON_ACTIVE_SQL: &str = include_str!("sql/set_coupon_active.sql");
const DELETE_COUPON_SQL: &str = include_str!("sql/delete_coupon.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCouponsRepository;

impl PgCouponsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_seller_coupons(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        seller: MemberUuid,
    ) -> Result<Vec<CouponRecord>, sqlx::Error> {
        query_as::<Postgres, CouponRecord>(LIST_SELLER_COUPONS_SQL)
            .bind(seller.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Lock one of the seller's coupons; other sellers' coupons are not found.
    pub(crate) async fn get_seller_coupon_for_update(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        seller: MemberUuid,
        coupon: CouponUuid,
    ) -> Result<CouponRecord, sqlx::Error> {
        query_as::<Postgres, CouponRecord>(GET_SELLER_COUPON_FOR_UPDATE_SQL)
            .bind(coupon.into_uuid())
            .bind(seller.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Share-lock the seller's coupons carrying any of `codes`.
    pub(crate) async fn lock_seller_coupons_by_code(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        seller: MemberUuid,
        codes: &[String],
    ) -> Result<Vec<CouponRecord>, sqlx::Error> {
        query_as::<Postgres, CouponRecord>(LOCK_SELLER_COUPONS_BY_CODE_SQL)
            .bind(seller.into_uuid())
            .bind(codes)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_coupon(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        seller: MemberUuid,
        coupon: CouponUuid,
        terms: &CouponTerms,
        is_active: bool,
    ) -> Result<CouponRecord, sqlx::Error> {
        query_as::<Postgres, CouponRecord>(CREATE_COUPON_SQL)
            .bind(coupon.into_uuid())
            .bind(seller.into_uuid())
            .bind(terms.code.trim())
            .bind(&terms.name)
            .bind(terms.kind.label())
            .bind(terms.rate)
            .bind(amount_param(terms.minimum, "minimum")?)
            .bind(SqlxTimestamp::from(terms.start_at))
            .bind(SqlxTimestamp::from(terms.end_at))
            .bind(is_active)
            .bind(&terms.description)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_coupon(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        seller: MemberUuid,
        coupon: CouponUuid,
        terms: &CouponTerms,
    ) -> Result<CouponRecord, sqlx::Error> {
        query_as::<Postgres, CouponRecord>(UPDATE_COUPON_SQL)
            .bind(coupon.into_uuid())
            .bind(seller.into_uuid())
            .bind(terms.code.trim())
            .bind(&terms.name)
            .bind(terms.kind.label())
            .bind(terms.rate)
            .bind(amount_param(terms.minimum, "minimum")?)
            .bind(SqlxTimestamp::from(terms.start_at))
            .bind(SqlxTimestamp::from(terms.end_at))
            .bind(&terms.description)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn set_coupon_active(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        seller: MemberUuid,
        coupon: CouponUuid,
        is_active: bool,
    ) -> Result<CouponRecord, sqlx::Error> {
        query_as::<Postgres, CouponRecord>(SET_COUPON_ACTIVE_SQL)
            .bind(coupon.into_uuid())
            .bind(seller.into_uuid())
            .bind(is_active)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_coupon(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        seller: MemberUuid,
        coupon: CouponUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_COUPON_SQL)
            .bind(coupon.into_uuid())
            .bind(seller.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for CouponRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get::<Uuid, _>("uuid")?.into(),
            seller_uuid: row.try_get::<Uuid, _>("seller_uuid")?.into(),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            rules: Coupon {
                code: row.try_get("code")?,
                kind: try_get_label(row, "kind")?,
                rate: row.try_get("rate")?,
                minimum: try_get_amount(row, "minimum")?,
                start_at: try_get_timestamp(row, "start_at")?,
                end_at: try_get_timestamp(row, "end_at")?,
                is_active: row.try_get("is_active")?,
            },
            applied: row.try_get("applied")?,
            created_at: try_get_timestamp(row, "created_at")?,
            updated_at: try_get_timestamp(row, "updated_at")?,
        })
    }
}
