//! Books Repository

use readitagain::books::BookFilter;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::domain::{
    books::{
        data::{BookDetails, BookQuery, NewBookPicture},
        records::{BookPictureRecord, BookRecord, BookUuid},
    },
    members::records::MemberUuid,
    rows::{amount_param, try_get_amount, try_get_label, try_get_timestamp},
};

const SEARCH_BOOKS_SQL: &str = include_str!("sql/search_books.sql");
const GET_BOOK_SQL: &str = include_str!("sql/get_book.sql");
const GET_SELLER_BOOK_FOR_UPDATE_SQL: &str = include_str!("sql/get_seller_book_for_update.sql");
const LIST_SELLER_BOOKS_SQL: &str = include_str!("sql/list_seller_books.sql");
const CREATE_BOOK_SQL: &str = include_str!("sql/create_book.sql");
const UPDATE_BOOK_SQL: &str = include_str!("sql/update_book.sql");
const DELETE_BOOK_SQL: &str = include_str!("sql/delete_book.sql");
const SELLER_EVENT_COUPON_EXISTS_SQL: &str = include_str!("sql/seller_event_coupon_exists.sql");
const CREATE_BOOK_PICTURE_SQL: &str = include_str!("sql/create_book_picture.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgBooksRepository;

impl PgBooksRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn search_books(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        search: &BookQuery,
    ) -> Result<Vec<BookRecord>, sqlx::Error> {
        let min_price = search
            .min_price
            .map(|price| amount_param(price, "min_price"))
            .transpose()?;

        let max_price = search
            .max_price
            .map(|price| amount_param(price, "max_price"))
            .transpose()?;

        query_as::<Postgres, BookRecord>(SEARCH_BOOKS_SQL)
            .bind(search.keyword.as_deref().map(like_pattern))
            .bind(search.category.as_deref())
            .bind(search.condition.as_deref())
            .bind(min_price)
            .bind(max_price)
            .bind(i64::from(search.page_size()))
            .bind(i64::from(search.offset.unwrap_or_default()))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_book(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        book: BookUuid,
    ) -> Result<BookRecord, sqlx::Error> {
        query_as::<Postgres, BookRecord>(GET_BOOK_SQL)
            .bind(book.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Lock one of the seller's books; other sellers' books are not found.
    pub(crate) async fn get_seller_book_for_update(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        seller: MemberUuid,
        book: BookUuid,
    ) -> Result<BookRecord, sqlx::Error> {
        query_as::<Postgres, BookRecord>(GET_SELLER_BOOK_FOR_UPDATE_SQL)
            .bind(book.into_uuid())
            .bind(seller.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_seller_books(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        seller: MemberUuid,
        filter: BookFilter,
    ) -> Result<Vec<BookRecord>, sqlx::Error> {
        let (state, without_pictures) = match filter {
            BookFilter::All => (None, false),
            BookFilter::State(state) => (Some(state.label()), false),
            BookFilter::NoPicture => (None, true),
        };

        query_as::<Postgres, BookRecord>(LIST_SELLER_BOOKS_SQL)
            .bind(seller.into_uuid())
            .bind(state)
            .bind(without_pictures)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_book(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        seller: MemberUuid,
        book: BookUuid,
        details: &BookDetails,
    ) -> Result<BookRecord, sqlx::Error> {
        query_as::<Postgres, BookRecord>(CREATE_BOOK_SQL)
            .bind(book.into_uuid())
            .bind(seller.into_uuid())
            .bind(&details.isbn)
            .bind(&details.name)
            .bind(&details.condition)
            .bind(amount_param(details.price, "price")?)
            .bind(&details.shipping_location)
            .bind(details.shipping_method.label())
            .bind(details.discount_code.as_deref())
            .bind(&details.description)
            .bind(&details.category)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_book(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        seller: MemberUuid,
        book: BookUuid,
        details: &BookDetails,
    ) -> Result<BookRecord, sqlx::Error> {
        query_as::<Postgres, BookRecord>(UPDATE_BOOK_SQL)
            .bind(book.into_uuid())
            .bind(seller.into_uuid())
            .bind(&details.isbn)
            .bind(&details.name)
            .bind(&details.condition)
            .bind(amount_param(details.price, "price")?)
            .bind(&details.shipping_location)
            .bind(details.shipping_method.label())
            .bind(details.discount_code.as_deref())
            .bind(&details.description)
            .bind(&details.category)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_book(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        seller: MemberUuid,
        book: BookUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_BOOK_SQL)
            .bind(book.into_uuid())
            .bind(seller.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn seller_event_coupon_exists(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        seller: MemberUuid,
        code: &str,
    ) -> Result<bool, sqlx::Error> {
        query_scalar::<Postgres, bool>(SELLER_EVENT_COUPON_EXISTS_SQL)
            .bind(seller.into_uuid())
            .bind(code)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_book_picture(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        book: BookUuid,
        picture: &NewBookPicture,
    ) -> Result<BookPictureRecord, sqlx::Error> {
        query_as::<Postgres, BookPictureRecord>(CREATE_BOOK_PICTURE_SQL)
            .bind(picture.uuid.into_uuid())
            .bind(book.into_uuid())
            .bind(&picture.path)
            .fetch_one(&mut **tx)
            .await
    }
}

/// Wrap a keyword for `ILIKE`, escaping its wildcards.
fn like_pattern(keyword: &str) -> String {
    let mut pattern = String::with_capacity(keyword.len() + 2);

    pattern.push('%');

    for c in keyword.trim().chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }

        pattern.push(c);
    }

    pattern.push('%');

    pattern
}

impl<'r> FromRow<'r, PgRow> for BookRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get::<Uuid, _>("uuid")?.into(),
            seller_uuid: row.try_get::<Uuid, _>("seller_uuid")?.into(),
            order_uuid: row.try_get::<Option<Uuid>, _>("order_uuid")?.map(Into::into),
            discount_code: row.try_get("discount_code")?,
            isbn: row.try_get("isbn")?,
            name: row.try_get("name")?,
            condition: row.try_get("condition")?,
            price: try_get_amount(row, "price")?,
            shipping_location: row.try_get("shipping_location")?,
            shipping_method: try_get_label(row, "shipping_method")?,
            description: row.try_get("description")?,
            category: row.try_get("category")?,
            state: try_get_label(row, "state")?,
            pictures: row.try_get("pictures")?,
            created_at: try_get_timestamp(row, "created_at")?,
            updated_at: try_get_timestamp(row, "updated_at")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for BookPictureRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get::<Uuid, _>("uuid")?.into(),
            book_uuid: row.try_get::<Uuid, _>("book_uuid")?.into(),
            path: row.try_get("path")?,
            position: row.try_get("position")?,
            created_at: try_get_timestamp(row, "created_at")?,
        })
    }
}
