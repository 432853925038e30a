//! Auth middleware.

use std::sync::Arc;

use salvo::{http::header::AUTHORIZATION, prelude::*};

use crate::{auth::errors::into_status_error, extensions::*, state::State};

const TOKEN_QUERY_PARAM: &str = "token";

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(token) = extract_token(req) else {
        res.render(StatusError::unauthorized().brief("Missing access token"));
        ctrl.skip_rest();

        return;
    };

    let state = match depot.obtain_or_500::<Arc<State>>() {
        Ok(state) => Arc::clone(state),
        Err(status) => {
            res.render(status);
            ctrl.skip_rest();

            return;
        }
    };

    match state.app.auth.authenticate_bearer(&token).await {
        Ok(member) => depot.insert_member_uuid(member),
        Err(error) => {
            res.render(into_status_error(error));
            ctrl.skip_rest();

            return;
        }
    }

    ctrl.call_next(req, depot, res).await;
}

/// The `token` query parameter wins over the `Authorization: Bearer` header.
fn extract_token(req: &Request) -> Option<String> {
    let from_query = req
        .query::<String>(TOKEN_QUERY_PARAM)
        .map(|token| token.trim().to_owned())
        .filter(|token| !token.is_empty());

    from_query.or_else(|| extract_bearer_token(req).map(str::to_owned))
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}
