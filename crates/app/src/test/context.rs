//! Test context for service-level integration tests.

use jiff::SignedDuration;

use crate::{
    auth::{PgAuthService, TokenSigner},
    database::Db,
    domain::{
        addresses::PgAddressesService, books::PgBooksService, carts::PgCartsService,
        checkout::PgCheckoutService, coupons::PgCouponsService, members::PgMembersService,
        orders::PgOrdersService,
    },
};

use super::db::TestDb;

const TEST_JWT_SECRET: &[u8] = b"readitagain-test-secret";

pub(crate) struct TestContext {
    pub db: TestDb,
    pub signer: TokenSigner,
    pub auth: PgAuthService,
    pub members: PgMembersService,
    pub addresses: PgAddressesService,
    pub books: PgBooksService,
    pub carts: PgCartsService,
    pub coupons: PgCouponsService,
    pub checkout: PgCheckoutService,
    pub orders: PgOrdersService,
}

impl TestContext {
    pub async fn new() -> Self {
        let test_db = TestDb::new().await;
        let db = Db::new(test_db.pool().clone());

        let signer = TokenSigner::new(TEST_JWT_SECRET, SignedDuration::from_mins(30))
            .expect("Failed to build test token signer");

        Self {
            auth: PgAuthService::new(db.clone(), signer.clone()),
            members: PgMembersService::new(db.clone()),
            addresses: PgAddressesService::new(db.clone()),
            books: PgBooksService::new(db.clone()),
            carts: PgCartsService::new(db.clone()),
            coupons: PgCouponsService::new(db.clone()),
            checkout: PgCheckoutService::new(db.clone()),
            orders: PgOrdersService::new(db),
            signer,
            db: test_db,
        }
    }
}
