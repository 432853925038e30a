//! ReadItAgain JSON API Healthcheck Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{extensions::*, state::State};

/// Healthcheck response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Database reachability
    pub database: String,
}

/// Healthcheck handler
///
/// Reports `ok` when the database answers, 503 otherwise.
#[endpoint(tags("health"), summary = "Health check endpoint")]
pub(crate) async fn handler(
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<HealthResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let (status, database) = match state.app.db.ping().await {
        Ok(()) => ("ok", "ok"),
        Err(source) => {
            warn!("database ping failed: {source}");
            res.status_code(StatusCode::SERVICE_UNAVAILABLE);

            ("degraded", "unavailable")
        }
    };

    Ok(Json(HealthResponse {
        status: status.to_string(),
        database: database.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::Mocks;

    use super::*;

    #[tokio::test]
    async fn test_healthcheck_reports_unreachable_database() -> TestResult {
        let service = Mocks::default().public_service(Router::with_path("healthcheck").get(handler));

        let mut res = TestClient::get("http://example.com/healthcheck")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::SERVICE_UNAVAILABLE));

        let response: HealthResponse = res.take_json().await?;

        assert_eq!(response.status, "degraded");
        assert_eq!(response.database, "unavailable");

        Ok(())
    }
}
