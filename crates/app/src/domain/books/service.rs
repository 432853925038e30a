//! Books service.

use async_trait::async_trait;
use mockall::automock;
use readitagain::books::BookFilter;
use sqlx::{Postgres, Transaction};
use tracing::{Span, info};

use crate::{
    database::Db,
    domain::{
        books::{
            data::{BookDetails, BookQuery, NewBook, NewBookPicture},
            errors::BooksServiceError,
            records::{BookPictureRecord, BookRecord, BookUuid},
            repository::PgBooksRepository,
        },
        members::records::MemberUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgBooksService {
    db: Db,
    repository: PgBooksRepository,
}

impl PgBooksService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgBooksRepository::new(),
        }
    }

    async fn check_discount_code(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        seller: MemberUuid,
        details: &BookDetails,
    ) -> Result<(), BooksServiceError> {
        let Some(code) = details.discount_code.as_deref() else {
            return Ok(());
        };

        if self
            .repository
            .seller_event_coupon_exists(tx, seller, code)
            .await?
        {
            Ok(())
        } else {
            Err(BooksServiceError::UnknownDiscountCode(code.to_string()))
        }
    }

    /// Lock a seller's book and make sure it can still be changed.
    async fn lock_editable(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        seller: MemberUuid,
        book: BookUuid,
    ) -> Result<BookRecord, BooksServiceError> {
        let record = self
            .repository
            .get_seller_book_for_update(tx, seller, book)
            .await?;

        if !record.state.is_editable() || record.order_uuid.is_some() {
            return Err(BooksServiceError::Conflict {
                state: record.state,
            });
        }

        Ok(record)
    }
}

#[async_trait]
impl BooksService for PgBooksService {
    #[tracing::instrument(
        name = "books.service.search_books",
        skip(self, query),
        fields(result_count = tracing::field::Empty),
        err
    )]
    async fn search_books(&self, query: BookQuery) -> Result<Vec<BookRecord>, BooksServiceError> {
        let mut tx = self.db.begin().await?;

        let books = self.repository.search_books(&mut tx, &query).await?;

        tx.commit().await?;

        Span::current().record("result_count", books.len());

        Ok(books)
    }

    async fn get_book(&self, book: BookUuid) -> Result<BookRecord, BooksServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.repository.get_book(&mut tx, book).await?;

        tx.commit().await?;

        Ok(record)
    }

    async fn list_seller_books(
        &self,
        seller: MemberUuid,
        filter: BookFilter,
    ) -> Result<Vec<BookRecord>, BooksServiceError> {
        let mut tx = self.db.begin().await?;

        let books = self
            .repository
            .list_seller_books(&mut tx, seller, filter)
            .await?;

        tx.commit().await?;

        Ok(books)
    }

    #[tracing::instrument(
        name = "books.service.create_book",
        skip(self, book),
        fields(seller_uuid = %seller, book_uuid = %book.uuid),
        err
    )]
    async fn create_book(
        &self,
        seller: MemberUuid,
        book: NewBook,
    ) -> Result<BookRecord, BooksServiceError> {
        let mut tx = self.db.begin().await?;

        self.check_discount_code(&mut tx, seller, &book.details)
            .await?;

        let record = self
            .repository
            .create_book(&mut tx, seller, book.uuid, &book.details)
            .await?;

        tx.commit().await?;

        info!(book_uuid = %record.uuid, isbn = %record.isbn, "listed book");

        Ok(record)
    }

    #[tracing::instrument(
        name = "books.service.update_book",
        skip(self, details),
        fields(seller_uuid = %seller, book_uuid = %book),
        err
    )]
    async fn update_book(
        &self,
        seller: MemberUuid,
        book: BookUuid,
        details: BookDetails,
    ) -> Result<BookRecord, BooksServiceError> {
        let mut tx = self.db.begin().await?;

        self.lock_editable(&mut tx, seller, book).await?;
        self.check_discount_code(&mut tx, seller, &details).await?;

        let record = self
            .repository
            .update_book(&mut tx, seller, book, &details)
            .await?;

        tx.commit().await?;

        info!(book_uuid = %book, "updated book");

        Ok(record)
    }

    #[tracing::instrument(
        name = "books.service.delete_book",
        skip(self),
        fields(seller_uuid = %seller, book_uuid = %book),
        err
    )]
    async fn delete_book(&self, seller: MemberUuid, book: BookUuid) -> Result<(), BooksServiceError> {
        let mut tx = self.db.begin().await?;

        self.lock_editable(&mut tx, seller, book).await?;

        let rows_affected = self.repository.delete_book(&mut tx, seller, book).await?;

        if rows_affected == 0 {
            return Err(BooksServiceError::NotFound);
        }

        tx.commit().await?;

        info!(book_uuid = %book, "deleted book");

        Ok(())
    }

    #[tracing::instrument(
        name = "books.service.add_picture",
        skip(self, picture),
        fields(seller_uuid = %seller, book_uuid = %book, path = %picture.path),
        err
    )]
    async fn add_picture(
        &self,
        seller: MemberUuid,
        book: BookUuid,
        picture: NewBookPicture,
    ) -> Result<BookPictureRecord, BooksServiceError> {
        let mut tx = self.db.begin().await?;

        self.repository
            .get_seller_book_for_update(&mut tx, seller, book)
            .await?;

        let record = self
            .repository
            .create_book_picture(&mut tx, book, &picture)
            .await?;

        tx.commit().await?;

        info!(picture_uuid = %record.uuid, position = record.position, "added book picture");

        Ok(record)
    }
}

#[automock]
#[async_trait]
pub trait BooksService: Send + Sync {
    /// Search books that are on sale, newest first.
    async fn search_books(&self, query: BookQuery) -> Result<Vec<BookRecord>, BooksServiceError>;

    /// Retrieve a single book with its pictures.
    async fn get_book(&self, book: BookUuid) -> Result<BookRecord, BooksServiceError>;

    /// List a seller's own books for the dashboard.
    async fn list_seller_books(
        &self,
        seller: MemberUuid,
        filter: BookFilter,
    ) -> Result<Vec<BookRecord>, BooksServiceError>;

    /// List a new book for sale.
    async fn create_book(
        &self,
        seller: MemberUuid,
        book: NewBook,
    ) -> Result<BookRecord, BooksServiceError>;

    /// Edit a listing that is still on sale.
    async fn update_book(
        &self,
        seller: MemberUuid,
        book: BookUuid,
        details: BookDetails,
    ) -> Result<BookRecord, BooksServiceError>;

    /// Withdraw a listing that is still on sale.
    async fn delete_book(&self, seller: MemberUuid, book: BookUuid) -> Result<(), BooksServiceError>;

    /// Attach an uploaded picture to one of the seller's books.
    async fn add_picture(
        &self,
        seller: MemberUuid,
        book: BookUuid,
        picture: NewBookPicture,
    ) -> Result<BookPictureRecord, BooksServiceError>;
}
