//! Search Books Handler

use std::sync::Arc;

use readitagain_app::domain::books::data::BookQuery;
use salvo::prelude::*;
use serde::Deserialize;

use crate::{
    books::{errors::into_status_error, models::BooksResponse},
    extensions::*,
    state::State,
};

/// Book Search Query
#[derive(Debug, Default, Deserialize, ToParameters)]
#[salvo(parameters(default_parameter_in = Query))]
pub(crate) struct BookSearchQuery {
    /// Case-insensitive match on name or ISBN
    pub keyword: Option<String>,
    pub category: Option<String>,
    pub condition: Option<String>,
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
    /// Page size, 20 by default and at most 100
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl From<BookSearchQuery> for BookQuery {
    fn from(query: BookSearchQuery) -> Self {
        let non_blank = |value: Option<String>| {
            value
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        BookQuery {
            keyword: non_blank(query.keyword),
            category: non_blank(query.category),
            condition: non_blank(query.condition),
            min_price: query.min_price,
            max_price: query.max_price,
            limit: query.limit,
            offset: query.offset,
        }
    }
}

/// Search Books Handler
///
/// Lists books currently on sale, newest first.
#[endpoint(tags("books"), summary = "Search Books")]
pub(crate) async fn handler(
    query: BookSearchQuery,
    depot: &mut Depot,
) -> Result<Json<BooksResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let books = state
        .app
        .books
        .search_books(query.into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(books.into()))
}
