//! Test helpers.

use std::{sync::Arc, time::Duration};

use readitagain_app::{
    auth::MockAuthService,
    context::AppContext,
    database::Db,
    domain::{
        addresses::MockAddressesService, books::MockBooksService, carts::MockCartsService,
        checkout::MockCheckoutService, coupons::MockCouponsService,
        members::{MockMembersService, records::MemberUuid},
        orders::MockOrdersService,
    },
};
use salvo::{affix_state::inject, prelude::*};
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use crate::{extensions::*, state::State, uploads::Uploads};

pub(crate) const TEST_MEMBER_UUID: MemberUuid = MemberUuid::from_uuid(Uuid::nil());

#[salvo::handler]
pub(crate) async fn inject_member(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_member_uuid(TEST_MEMBER_UUID);
    ctrl.call_next(req, depot, res).await;
}

/// A pool that never connects. Handler tests go through the mocked services.
pub(crate) fn unreachable_db() -> Db {
    let pool = PgPoolOptions::new()
        .acquire_timeout(Duration::from_millis(50))
        .connect_lazy("postgres://readitagain@127.0.0.1:1/readitagain")
        .expect("lazy pool options should be valid");

    Db::new(pool)
}

/// Mocked services. Calls without a matching expectation fail the test.
#[derive(Default)]
pub(crate) struct Mocks {
    pub(crate) auth: MockAuthService,
    pub(crate) members: MockMembersService,
    pub(crate) addresses: MockAddressesService,
    pub(crate) books: MockBooksService,
    pub(crate) carts: MockCartsService,
    pub(crate) coupons: MockCouponsService,
    pub(crate) checkout: MockCheckoutService,
    pub(crate) orders: MockOrdersService,
}

impl Mocks {
    pub(crate) fn into_state(self, uploads: Uploads) -> Arc<State> {
        let app = AppContext {
            db: unreachable_db(),
            auth: Arc::new(self.auth),
            members: Arc::new(self.members),
            addresses: Arc::new(self.addresses),
            books: Arc::new(self.books),
            carts: Arc::new(self.carts),
            coupons: Arc::new(self.coupons),
            checkout: Arc::new(self.checkout),
            orders: Arc::new(self.orders),
        };

        State::new(app, uploads)
    }

    /// Serve `route` as the test member.
    pub(crate) fn service(self, route: Router) -> Service {
        self.service_with_uploads(Uploads::new(std::env::temp_dir()), route)
    }

    pub(crate) fn service_with_uploads(self, uploads: Uploads, route: Router) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(self.into_state(uploads)))
                .hoop(inject_member)
                .push(route),
        )
    }

    /// Serve `route` without an authenticated member.
    pub(crate) fn public_service(self, route: Router) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(self.into_state(Uploads::new(std::env::temp_dir()))))
                .push(route),
        )
    }
}

/// A `multipart/form-data` body carrying one file field, and its content type.
pub(crate) fn multipart_file(field: &str, file_name: &str, contents: &str) -> (String, String) {
    let boundary = "readitagain-test-boundary";

    let body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n\
         Content-Type: application/octet-stream\r\n\r\n\
         {contents}\r\n\
         --{boundary}--\r\n"
    );

    (format!("multipart/form-data; boundary={boundary}"), body)
}
