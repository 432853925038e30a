//! Address Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    addresses::{
        errors::into_status_error,
        models::{AddressResponse, AddressesResponse},
    },
    extensions::*,
    state::State,
};

/// Address Index Handler
#[endpoint(tags("addresses"), summary = "My Addresses", security(("bearer_auth" = [])))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<AddressesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let member = depot.member_uuid_or_401()?;

    let addresses = state
        .app
        .addresses
        .list_addresses(member)
        .await
        .map_err(into_status_error)?;

    Ok(Json(AddressesResponse {
        addresses: addresses.into_iter().map(AddressResponse::from).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use readitagain_app::domain::addresses::records::{AddressRecord, AddressUuid};
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, TEST_MEMBER_UUID};

    use super::*;

    #[tokio::test]
    async fn test_index_lists_addresses() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .addresses
            .expect_list_addresses()
            .once()
            .withf(|member| *member == TEST_MEMBER_UUID)
            .return_once(|member| {
                Ok(vec![AddressRecord {
                    uuid: AddressUuid::new(),
                    member_uuid: member,
                    recipient: "Reader".to_string(),
                    phone: "0912345678".to_string(),
                    location: "Taipei".to_string(),
                    created_at: Timestamp::UNIX_EPOCH,
                    updated_at: Timestamp::UNIX_EPOCH,
                }])
            });

        let service = mocks.service(Router::with_path("addresses").get(handler));

        let mut res = TestClient::get("http://example.com/addresses")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: AddressesResponse = res.take_json().await?;

        assert_eq!(body.addresses.len(), 1);
        assert_eq!(body.addresses[0].location, "Taipei");

        Ok(())
    }
}
