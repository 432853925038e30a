//! Seller Book Index Handler

use std::sync::Arc;

use readitagain::books::BookFilter;
use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    books::{errors::into_status_error, models::BooksResponse},
    extensions::*,
    state::State,
};

/// Seller Book Index Handler
///
/// Lists your own listings, optionally filtered by `all`, `on_sale`,
/// `ordered`, `sold` or `no_picture`.
#[endpoint(
    tags("seller"),
    summary = "List My Books",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    filter: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<BooksResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let seller = depot.member_uuid_or_401()?;

    let filter = filter
        .into_inner()
        .map(|value| value.parse::<BookFilter>())
        .transpose()
        .or_400("Invalid filter")?
        .unwrap_or_default();

    let books = state
        .app
        .books
        .list_seller_books(seller, filter)
        .await
        .map_err(into_status_error)?;

    Ok(Json(books.into()))
}

#[cfg(test)]
mod tests {
    use readitagain::books::BookState;
    use readitagain_app::domain::books::records::BookUuid;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::{
        books::models::fixtures::make_book,
        test_helpers::{Mocks, TEST_MEMBER_UUID},
    };

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        mocks.service(Router::with_path("seller_page/book").get(handler))
    }

    #[tokio::test]
    async fn test_index_defaults_to_all() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .books
            .expect_list_seller_books()
            .once()
            .withf(|seller, filter| *seller == TEST_MEMBER_UUID && *filter == BookFilter::All)
            .return_once(|_, _| Ok(vec![make_book(BookUuid::new(), TEST_MEMBER_UUID, 100)]));

        let mut res = TestClient::get("http://example.com/seller_page/book")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: BooksResponse = res.take_json().await?;

        assert_eq!(body.books.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_index_forwards_state_filter() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .books
            .expect_list_seller_books()
            .once()
            .withf(|_, filter| *filter == BookFilter::State(BookState::Sold))
            .return_once(|_, _| Ok(Vec::new()));

        let res = TestClient::get("http://example.com/seller_page/book?filter=sold")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_index_unknown_filter_returns_400() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.books.expect_list_seller_books().never();

        let res = TestClient::get("http://example.com/seller_page/book?filter=archived")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
