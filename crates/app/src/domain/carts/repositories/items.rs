//! Cart Items Repository

use readitagain::books::BookState;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::domain::{
    books::records::{BookRecord, BookUuid},
    carts::{
        data::NewCartItem,
        records::{CartItemRecord, CartLine, CartUuid},
    },
    members::records::MemberUuid,
    rows::{try_get_label, try_get_timestamp},
};

const GET_CART_BOOK_SQL: &str = include_str!("../sql/get_cart_book.sql");
const CREATE_CART_ITEM_SQL: &str = include_str!("../sql/create_cart_item.sql");
const DELETE_CART_ITEM_SQL: &str = include_str!("../sql/delete_cart_item.sql");
const GET_CART_LINES_SQL: &str = include_str!("../sql/get_cart_lines.sql");

/// What the cart needs to know about a book before adding it.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CartBook {
    pub seller_uuid: MemberUuid,
    pub state: BookState,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartItemsRepository;

impl PgCartItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_cart_book(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        book: BookUuid,
    ) -> Result<CartBook, sqlx::Error> {
        query_as::<Postgres, CartBook>(GET_CART_BOOK_SQL)
            .bind(book.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_cart_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        item: &NewCartItem,
    ) -> Result<CartItemRecord, sqlx::Error> {
        query_as::<Postgres, CartItemRecord>(CREATE_CART_ITEM_SQL)
            .bind(item.uuid.into_uuid())
            .bind(cart.into_uuid())
            .bind(item.book_uuid.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_cart_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: MemberUuid,
        book: BookUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CART_ITEM_SQL)
            .bind(customer.into_uuid())
            .bind(book.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// On-sale cart lines, optionally narrowed to one seller.
    pub(crate) async fn get_cart_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: MemberUuid,
        seller: Option<MemberUuid>,
    ) -> Result<Vec<CartLine>, sqlx::Error> {
        query_as::<Postgres, CartLine>(GET_CART_LINES_SQL)
            .bind(customer.into_uuid())
            .bind(seller.map(MemberUuid::into_uuid))
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for CartBook {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            seller_uuid: row.try_get::<Uuid, _>("seller_uuid")?.into(),
            state: try_get_label(row, "state")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for CartItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get::<Uuid, _>("uuid")?.into(),
            cart_uuid: row.try_get::<Uuid, _>("cart_uuid")?.into(),
            book_uuid: row.try_get::<Uuid, _>("book_uuid")?.into(),
            created_at: try_get_timestamp(row, "created_at")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for CartLine {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            item_uuid: row.try_get::<Uuid, _>("item_uuid")?.into(),
            seller_name: row.try_get("seller_name")?,
            book: BookRecord::from_row(row)?,
        })
    }
}
