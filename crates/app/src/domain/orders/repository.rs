//! Orders Repository

use readitagain::orders::{OrderStatus, Party, PendingCancellation, Stars};
use rustc_hash::FxHashMap;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::domain::{
    members::records::MemberUuid,
    orders::{
        data::NewOrder,
        records::{OrderLine, OrderRecord, OrderUuid},
    },
    rows::{
        amount_param, try_get_amount, try_get_label, try_get_optional_label, try_get_timestamp,
    },
};

const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const GET_PARTY_ORDER_FOR_UPDATE_SQL: &str = include_str!("sql/get_party_order_for_update.sql");
const LIST_PARTY_ORDERS_SQL: &str = include_str!("sql/list_party_orders.sql");
const GET_ORDER_LINES_SQL: &str = include_str!("sql/get_order_lines.sql");
const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const UPDATE_ORDER_STATUS_SQL: &str = include_str!("sql/update_order_status.sql");
const REQUEST_CANCELLATION_SQL: &str = include_str!("sql/request_cancellation.sql");
const RESOLVE_CANCELLATION_SQL: &str = include_str!("sql/resolve_cancellation.sql");
const REVIEW_ORDER_SQL: &str = include_str!("sql/review_order.sql");
const MARK_ORDER_BOOKS_SOLD_SQL: &str = include_str!("sql/mark_order_books_sold.sql");
const CREATE_ORDER_LINES_SQL: &str = include_str!("sql/create_order_lines.sql");
const RELEASE_ORDER_BOOKS_SQL: &str = include_str!("sql/release_order_books.sql");

/// An order line tagged with the order it belongs to.
struct OrderLineRow {
    order_uuid: OrderUuid,
    line: OrderLine,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Fetch an order with its lines.
    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        let record = query_as::<Postgres, OrderRecord>(GET_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        let mut records = vec![record];

        self.attach_lines(tx, &mut records).await?;

        records.pop().ok_or(sqlx::Error::RowNotFound)
    }

    /// Lock an order `member` takes part in as `party`. Lines are not loaded.
    pub(crate) async fn get_party_order_for_update(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        member: MemberUuid,
        party: Party,
        order: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(GET_PARTY_ORDER_FOR_UPDATE_SQL)
            .bind(order.into_uuid())
            .bind(member.into_uuid())
            .bind(party.label())
            .fetch_one(&mut **tx)
            .await
    }

    /// Orders `member` takes part in as `party`, newest first.
    pub(crate) async fn list_party_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        member: MemberUuid,
        party: Party,
        statuses: &[OrderStatus],
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        let labels: Vec<&str> = statuses.iter().copied().map(OrderStatus::label).collect();

        let mut records = query_as::<Postgres, OrderRecord>(LIST_PARTY_ORDERS_SQL)
            .bind(member.into_uuid())
            .bind(party.label())
            .bind(labels)
            .fetch_all(&mut **tx)
            .await?;

        self.attach_lines(tx, &mut records).await?;

        Ok(records)
    }

    async fn attach_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        records: &mut [OrderRecord],
    ) -> Result<(), sqlx::Error> {
        if records.is_empty() {
            return Ok(());
        }

        let uuids: Vec<Uuid> = records.iter().map(|record| record.uuid.into_uuid()).collect();

        let rows = query_as::<Postgres, OrderLineRow>(GET_ORDER_LINES_SQL)
            .bind(uuids)
            .fetch_all(&mut **tx)
            .await?;

        let mut lines: FxHashMap<OrderUuid, Vec<OrderLine>> = FxHashMap::default();

        for row in rows {
            lines.entry(row.order_uuid).or_default().push(row.line);
        }

        for record in records {
            record.lines = lines.remove(&record.uuid).unwrap_or_default();
        }

        Ok(())
    }

    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: &NewOrder,
    ) -> Result<(), sqlx::Error> {
        let summary = &order.summary;

        let total_count = i32::try_from(summary.total_count).map_err(|e| {
            sqlx::Error::ColumnDecode {
                index: "total_count".to_string(),
                source: Box::new(e),
            }
        })?;

        query(CREATE_ORDER_SQL)
            .bind(order.uuid.into_uuid())
            .bind(order.seller_uuid.into_uuid())
            .bind(order.customer_uuid.into_uuid())
            .bind(order.shipping_method.label())
            .bind(amount_param(summary.shipping_fee, "shipping_fee")?)
            .bind(amount_param(summary.books_total, "books_total")?)
            .bind(amount_param(summary.discount_amount, "discount_amount")?)
            .bind(amount_param(summary.total, "total_amount")?)
            .bind(total_count)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn update_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<(), sqlx::Error> {
        query(UPDATE_ORDER_STATUS_SQL)
            .bind(order.into_uuid())
            .bind(status.label())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn request_cancellation(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        pending: PendingCancellation,
        reason: &str,
    ) -> Result<(), sqlx::Error> {
        query(REQUEST_CANCELLATION_SQL)
            .bind(order.into_uuid())
            .bind(pending.previous.label())
            .bind(pending.requested_by.label())
            .bind(reason)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    /// Store the reply. Unless the order is now cancelled, the request itself is
    /// cleared.
    pub(crate) async fn resolve_cancellation(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        status: OrderStatus,
        message: &str,
    ) -> Result<(), sqlx::Error> {
        query(RESOLVE_CANCELLATION_SQL)
            .bind(order.into_uuid())
            .bind(status.label())
            .bind(message)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn review_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        stars: Stars,
        comment: &str,
    ) -> Result<(), sqlx::Error> {
        query(REVIEW_ORDER_SQL)
            .bind(order.into_uuid())
            .bind(i16::from(stars.get()))
            .bind(comment)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn mark_books_sold(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(MARK_ORDER_BOOKS_SOLD_SQL)
            .bind(order.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Snapshot the books claimed by `order` as its lines.
    pub(crate) async fn create_order_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(CREATE_ORDER_LINES_SQL)
            .bind(order.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Put the order's unsold books back on sale and detach them.
    pub(crate) async fn release_books(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(RELEASE_ORDER_BOOKS_SQL)
            .bind(order.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

fn try_get_stars(row: &PgRow) -> Result<Option<Stars>, sqlx::Error> {
    let Some(stars) = row.try_get::<Option<i16>, _>("stars")? else {
        return Ok(None);
    };

    let decode_error = |source: Box<dyn std::error::Error + Send + Sync>| sqlx::Error::ColumnDecode {
        index: "stars".to_string(),
        source,
    };

    let stars = u8::try_from(stars).map_err(|e| decode_error(Box::new(e)))?;

    Stars::new(stars)
        .map(Some)
        .map_err(|e| decode_error(Box::new(e)))
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let total_count: i32 = row.try_get("total_count")?;

        Ok(Self {
            uuid: row.try_get::<Uuid, _>("uuid")?.into(),
            seller_uuid: row.try_get::<Uuid, _>("seller_uuid")?.into(),
            customer_uuid: row.try_get::<Uuid, _>("customer_uuid")?.into(),
            status: try_get_label(row, "status")?,
            shipping_method: try_get_label(row, "shipping_method")?,
            shipping_fee: try_get_amount(row, "shipping_fee")?,
            books_total: try_get_amount(row, "books_total")?,
            discount_amount: try_get_amount(row, "discount_amount")?,
            total_amount: try_get_amount(row, "total_amount")?,
            total_count: u32::try_from(total_count).map_err(|e| sqlx::Error::ColumnDecode {
                index: "total_count".to_string(),
                source: Box::new(e),
            })?,
            cancel_from_status: try_get_optional_label(row, "cancel_from_status")?,
            cancel_requested_by: try_get_optional_label(row, "cancel_requested_by")?,
            cancel_reason: row.try_get("cancel_reason")?,
            cancel_reply: row.try_get("cancel_reply")?,
            stars: try_get_stars(row)?,
            comment: row.try_get("comment")?,
            coupon_codes: row.try_get("coupon_codes")?,
            lines: Vec::new(),
            created_at: try_get_timestamp(row, "created_at")?,
            updated_at: try_get_timestamp(row, "updated_at")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderLineRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            order_uuid: row.try_get::<Uuid, _>("order_uuid")?.into(),
            line: OrderLine {
                book_uuid: row.try_get::<Uuid, _>("book_uuid")?.into(),
                isbn: row.try_get("isbn")?,
                name: row.try_get("name")?,
                price: try_get_amount(row, "price")?,
                state: try_get_label(row, "state")?,
            },
        })
    }
}
