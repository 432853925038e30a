//! Carts service.

use async_trait::async_trait;
use mockall::automock;
use readitagain::books::BookState;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        books::records::BookUuid,
        carts::{
            data::NewCartItem,
            errors::CartsServiceError,
            records::{CartItemRecord, CartItemUuid, SellerCart, group_by_seller},
            repositories::{PgCartItemsRepository, PgCartsRepository},
        },
        members::records::MemberUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    carts_repository: PgCartsRepository,
    items_repository: PgCartItemsRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts_repository: PgCartsRepository::new(),
            items_repository: PgCartItemsRepository::new(),
        }
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    #[tracing::instrument(
        name = "carts.service.add_book",
        skip(self),
        fields(customer_uuid = %customer, book_uuid = %book),
        err
    )]
    async fn add_book(
        &self,
        customer: MemberUuid,
        book: BookUuid,
    ) -> Result<CartItemRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let listing = self.items_repository.get_cart_book(&mut tx, book).await?;

        if listing.seller_uuid == customer {
            return Err(CartsServiceError::OwnBook);
        }

        if listing.state != BookState::OnSale {
            return Err(CartsServiceError::NotOnSale {
                state: listing.state,
            });
        }

        let cart = self.carts_repository.ensure_cart(&mut tx, customer).await?;

        let item = self
            .items_repository
            .create_cart_item(
                &mut tx,
                cart.uuid,
                &NewCartItem {
                    uuid: CartItemUuid::new(),
                    book_uuid: book,
                },
            )
            .await?;

        tx.commit().await?;

        info!(cart_uuid = %cart.uuid, item_uuid = %item.uuid, "added book to cart");

        Ok(item)
    }

    #[tracing::instrument(
        name = "carts.service.remove_book",
        skip(self),
        fields(customer_uuid = %customer, book_uuid = %book),
        err
    )]
    async fn remove_book(&self, customer: MemberUuid, book: BookUuid) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .items_repository
            .delete_cart_item(&mut tx, customer, book)
            .await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        tx.commit().await?;

        info!("removed book from cart");

        Ok(())
    }

    async fn show_cart(&self, customer: MemberUuid) -> Result<Vec<SellerCart>, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let lines = self
            .items_repository
            .get_cart_lines(&mut tx, customer, None)
            .await?;

        tx.commit().await?;

        Ok(group_by_seller(lines))
    }

    async fn show_cart_for_seller(
        &self,
        customer: MemberUuid,
        seller: MemberUuid,
    ) -> Result<SellerCart, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let lines = self
            .items_repository
            .get_cart_lines(&mut tx, customer, Some(seller))
            .await?;

        tx.commit().await?;

        Ok(group_by_seller(lines)
            .into_iter()
            .next()
            .unwrap_or_else(|| SellerCart::empty(seller)))
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Put a book in the customer's cart, creating the cart if needed.
    async fn add_book(
        &self,
        customer: MemberUuid,
        book: BookUuid,
    ) -> Result<CartItemRecord, CartsServiceError>;

    /// Take a book out of the customer's cart.
    async fn remove_book(&self, customer: MemberUuid, book: BookUuid) -> Result<(), CartsServiceError>;

    /// The on-sale books in the cart, grouped by seller.
    async fn show_cart(&self, customer: MemberUuid) -> Result<Vec<SellerCart>, CartsServiceError>;

    /// The on-sale books in the cart sold by `seller`.
    async fn show_cart_for_seller(
        &self,
        customer: MemberUuid,
        seller: MemberUuid,
    ) -> Result<SellerCart, CartsServiceError>;
}
