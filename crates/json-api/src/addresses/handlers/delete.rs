//! Delete Address Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{addresses::errors::into_status_error, extensions::*, state::State};

/// Delete Address Handler
#[endpoint(
    tags("addresses"),
    summary = "Delete an Address",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Address deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Address not found"),
    ),
)]
pub(crate) async fn handler(
    address: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let member = depot.member_uuid_or_401()?;

    state
        .app
        .addresses
        .delete_address(member, address.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use readitagain_app::domain::addresses::{AddressesServiceError, records::AddressUuid};
    use salvo::test::TestClient;
    use testresult::TestResult;

    use crate::test_helpers::Mocks;

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        mocks.service(Router::with_path("addresses/{address}").delete(handler))
    }

    #[tokio::test]
    async fn test_delete_returns_204() -> TestResult {
        let mut mocks = Mocks::default();
        let uuid = AddressUuid::new();

        mocks
            .addresses
            .expect_delete_address()
            .once()
            .withf(move |_, address| *address == uuid)
            .return_once(|_, _| Ok(()));

        let res = TestClient::delete(format!("http://example.com/addresses/{uuid}"))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_foreign_address_returns_404() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .addresses
            .expect_delete_address()
            .once()
            .return_once(|_, _| Err(AddressesServiceError::NotFound));

        let res = TestClient::delete(format!("http://example.com/addresses/{}", Uuid::now_v7()))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
