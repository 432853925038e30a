//! Checkout Repository

use readitagain::books::BookState;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::domain::{
    books::records::BookUuid,
    members::records::MemberUuid,
    orders::records::OrderUuid,
    rows::try_get_label,
};

const LOCK_BOOKS_SQL: &str = include_str!("sql/lock_books.sql");
const CLAIM_BOOKS_SQL: &str = include_str!("sql/claim_books.sql");
const CREATE_APPLIED_DISCOUNTS_SQL: &str = include_str!("sql/create_applied_discounts.sql");
const DELETE_CHECKED_OUT_ITEMS_SQL: &str = include_str!("sql/delete_checked_out_items.sql");

/// A book row held for the rest of the checkout transaction.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LockedBook {
    pub uuid: BookUuid,
    pub state: BookState,
    pub order_uuid: Option<OrderUuid>,
}

impl LockedBook {
    pub(crate) fn is_available(&self) -> bool {
        self.state == BookState::OnSale && self.order_uuid.is_none()
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCheckoutRepository;

impl PgCheckoutRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Lock the given books in a stable order.
    pub(crate) async fn lock_books(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        books: &[Uuid],
    ) -> Result<Vec<LockedBook>, sqlx::Error> {
        query_as::<Postgres, LockedBook>(LOCK_BOOKS_SQL)
            .bind(books)
            .fetch_all(&mut **tx)
            .await
    }

    /// Attach on-sale books to `order`, returning how many were claimed.
    pub(crate) async fn claim_books(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        books: &[Uuid],
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(CLAIM_BOOKS_SQL)
            .bind(order.into_uuid())
            .bind(books)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn create_applied_discounts(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        coupons: &[Uuid],
    ) -> Result<u64, sqlx::Error> {
        if coupons.is_empty() {
            return Ok(0);
        }

        let rows_affected = query(CREATE_APPLIED_DISCOUNTS_SQL)
            .bind(order.into_uuid())
            .bind(coupons)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_checked_out_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: MemberUuid,
        books: &[Uuid],
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CHECKED_OUT_ITEMS_SQL)
            .bind(customer.into_uuid())
            .bind(books)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for LockedBook {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get::<Uuid, _>("uuid")?.into(),
            state: try_get_label(row, "state")?,
            order_uuid: row.try_get::<Option<Uuid>, _>("order_uuid")?.map(Into::into),
        })
    }
}
