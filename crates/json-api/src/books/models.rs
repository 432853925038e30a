//! Book response models

use readitagain_app::domain::books::records::BookRecord;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Book Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BookResponse {
    pub uuid: Uuid,
    pub seller_uuid: Uuid,
    pub isbn: String,
    pub name: String,
    pub condition: String,
    pub price: u64,
    pub shipping_location: String,
    pub shipping_method: String,
    pub discount_code: Option<String>,
    pub description: String,
    pub category: String,

    /// `on sale`, `ordered` or `sold`
    pub state: String,

    /// Picture file names, served from `/images/{file}?type=book`
    pub pictures: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<BookRecord> for BookResponse {
    fn from(book: BookRecord) -> Self {
        Self {
            uuid: book.uuid.into(),
            seller_uuid: book.seller_uuid.into(),
            isbn: book.isbn,
            name: book.name,
            condition: book.condition,
            price: book.price,
            shipping_location: book.shipping_location,
            shipping_method: book.shipping_method.label().to_string(),
            discount_code: book.discount_code,
            description: book.description,
            category: book.category,
            state: book.state.label().to_string(),
            pictures: book.pictures,
            created_at: book.created_at.to_string(),
            updated_at: book.updated_at.to_string(),
        }
    }
}

/// Books Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BooksResponse {
    pub books: Vec<BookResponse>,
}

impl From<Vec<BookRecord>> for BooksResponse {
    fn from(books: Vec<BookRecord>) -> Self {
        Self {
            books: books.into_iter().map(BookResponse::from).collect(),
        }
    }
}
