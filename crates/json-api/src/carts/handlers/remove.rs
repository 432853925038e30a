//! Remove From Cart Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{carts::errors::into_status_error, extensions::*, state::State};

/// Remove From Cart Handler
#[endpoint(
    tags("carts"),
    summary = "Remove Book from Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Book removed"),
        (status_code = StatusCode::NOT_FOUND, description = "Book not in cart"),
    ),
)]
pub(crate) async fn handler(
    book: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.member_uuid_or_401()?;

    state
        .app
        .carts
        .remove_book(customer, book.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use readitagain_app::domain::{books::records::BookUuid, carts::CartsServiceError};
    use salvo::test::TestClient;
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, TEST_MEMBER_UUID};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        mocks.service(Router::with_path("remove-from-cart/{book}").delete(handler))
    }

    #[tokio::test]
    async fn test_remove_returns_204() -> TestResult {
        let mut mocks = Mocks::default();
        let book = BookUuid::new();

        mocks
            .carts
            .expect_remove_book()
            .once()
            .withf(move |customer, b| *customer == TEST_MEMBER_UUID && *b == book)
            .return_once(|_, _| Ok(()));

        let res = TestClient::delete(format!("http://example.com/remove-from-cart/{book}"))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));

        Ok(())
    }

    #[tokio::test]
    async fn test_remove_missing_item_returns_404() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .carts
            .expect_remove_book()
            .once()
            .return_once(|_, _| Err(CartsServiceError::NotFound));

        let res = TestClient::delete(format!(
            "http://example.com/remove-from-cart/{}",
            Uuid::now_v7()
        ))
        .send(&make_service(mocks))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
