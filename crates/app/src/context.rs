//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::{AuthService, PgAuthService, TokenSigner},
    database::{self, Db},
    domain::{
        addresses::{AddressesService, PgAddressesService},
        books::{BooksService, PgBooksService},
        carts::{CartsService, PgCartsService},
        checkout::{CheckoutService, PgCheckoutService},
        coupons::{CouponsService, PgCouponsService},
        members::{MembersService, PgMembersService},
        orders::{OrdersService, PgOrdersService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply migrations")]
    Migrate(#[source] sqlx::migrate::MigrateError),
}

/// Services shared by every request handler.
#[derive(Clone)]
pub struct AppContext {
    pub db: Db,
    pub auth: Arc<dyn AuthService>,
    pub members: Arc<dyn MembersService>,
    pub addresses: Arc<dyn AddressesService>,
    pub books: Arc<dyn BooksService>,
    pub carts: Arc<dyn CartsService>,
    pub coupons: Arc<dyn CouponsService>,
    pub checkout: Arc<dyn CheckoutService>,
    pub orders: Arc<dyn OrdersService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails, or when
    /// `run_migrations` is set and a migration fails.
    pub async fn from_database_url(
        url: &str,
        max_connections: u32,
        run_migrations: bool,
        signer: TokenSigner,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url, max_connections)
            .await
            .map_err(AppInitError::Database)?;

        if run_migrations {
            database::migrate(&pool)
                .await
                .map_err(AppInitError::Migrate)?;
        }

        Ok(Self::from_db(Db::new(pool), signer))
    }

    #[must_use]
    pub fn from_db(db: Db, signer: TokenSigner) -> Self {
        Self {
            auth: Arc::new(PgAuthService::new(db.clone(), signer)),
            members: Arc::new(PgMembersService::new(db.clone())),
            addresses: Arc::new(PgAddressesService::new(db.clone())),
            books: Arc::new(PgBooksService::new(db.clone())),
            carts: Arc::new(PgCartsService::new(db.clone())),
            coupons: Arc::new(PgCouponsService::new(db.clone())),
            checkout: Arc::new(PgCheckoutService::new(db.clone())),
            orders: Arc::new(PgOrdersService::new(db.clone())),
            db,
        }
    }
}
