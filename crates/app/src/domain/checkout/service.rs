//! Checkout service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use readitagain::{
    checkout::{CheckoutError, CheckoutLine, compute_checkout},
    coupons::{CouponEligibility, NotApplicable, eligible_coupons},
};
use sqlx::{Postgres, Transaction};
use tracing::{Span, info, warn};
use uuid::Uuid;

use crate::{
    database::Db,
    domain::{
        carts::{
            records::{CartLine, SellerCart, group_by_seller},
            repositories::PgCartItemsRepository,
        },
        checkout::{
            data::CheckoutSelection, errors::CheckoutServiceError, records::CheckoutPreview,
            repository::PgCheckoutRepository,
        },
        coupons::{records::CouponRecord, repository::PgCouponsRepository},
        members::records::MemberUuid,
        orders::{
            data::NewOrder,
            records::{OrderRecord, OrderUuid},
            repository::PgOrdersRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgCheckoutService {
    db: Db,
    repository: PgCheckoutRepository,
    items_repository: PgCartItemsRepository,
    coupons_repository: PgCouponsRepository,
    orders_repository: PgOrdersRepository,
}

impl PgCheckoutService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCheckoutRepository::new(),
            items_repository: PgCartItemsRepository::new(),
            coupons_repository: PgCouponsRepository::new(),
            orders_repository: PgOrdersRepository::new(),
        }
    }

    /// Resolve the selected codes against the seller's coupons, keeping input
    /// order.
    async fn selected_coupons(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        seller: MemberUuid,
        selection: &CheckoutSelection,
    ) -> Result<Vec<CouponRecord>, CheckoutServiceError> {
        let codes = selection.codes();

        if codes.is_empty() {
            return Ok(Vec::new());
        }

        let coupons = self
            .coupons_repository
            .lock_seller_coupons_by_code(tx, seller, &codes)
            .await?;

        Ok(match_codes(&codes, &coupons)?)
    }
}

fn match_codes(
    codes: &[String],
    coupons: &[CouponRecord],
) -> Result<Vec<CouponRecord>, CheckoutError> {
    codes
        .iter()
        .map(|code| {
            coupons
                .iter()
                .find(|coupon| coupon.rules.code == *code)
                .cloned()
                .ok_or_else(|| CheckoutError::CouponNotApplicable {
                    code: code.clone(),
                    reason: NotApplicable::Unknown,
                })
        })
        .collect()
}

fn checkout_lines(lines: &[CartLine]) -> Vec<CheckoutLine> {
    lines.iter().map(|line| line.book.checkout_line()).collect()
}

fn book_uuids(lines: &[CartLine]) -> Vec<Uuid> {
    lines.iter().map(|line| line.book.uuid.into_uuid()).collect()
}

fn seller_cart(seller: MemberUuid, lines: Vec<CartLine>) -> SellerCart {
    group_by_seller(lines)
        .into_iter()
        .next()
        .unwrap_or_else(|| SellerCart::empty(seller))
}

#[async_trait]
impl CheckoutService for PgCheckoutService {
    async fn select_coupons(
        &self,
        customer: MemberUuid,
        seller: MemberUuid,
        now: Timestamp,
    ) -> Result<CouponEligibility<CouponRecord>, CheckoutServiceError> {
        let mut tx = self.db.begin().await?;

        let lines = self
            .items_repository
            .get_cart_lines(&mut tx, customer, Some(seller))
            .await?;

        let coupons = self
            .coupons_repository
            .list_seller_coupons(&mut tx, seller)
            .await?;

        tx.commit().await?;

        Ok(eligible_coupons(coupons, &checkout_lines(&lines), now))
    }

    async fn preview(
        &self,
        customer: MemberUuid,
        seller: MemberUuid,
        selection: CheckoutSelection,
        now: Timestamp,
    ) -> Result<CheckoutPreview, CheckoutServiceError> {
        let mut tx = self.db.begin().await?;

        let lines = self
            .items_repository
            .get_cart_lines(&mut tx, customer, Some(seller))
            .await?;

        let coupons = self.selected_coupons(&mut tx, seller, &selection).await?;

        tx.commit().await?;

        let summary = compute_checkout(
            &checkout_lines(&lines),
            selection.shipping_method,
            &coupons,
            now,
        )?;

        Ok(CheckoutPreview {
            cart: seller_cart(seller, lines),
            summary,
        })
    }

    #[tracing::instrument(
        name = "checkout.service.place_order",
        skip(self, selection),
        fields(
            customer_uuid = %customer,
            seller_uuid = %seller,
            order_uuid = tracing::field::Empty,
            total = tracing::field::Empty
        ),
        err
    )]
    async fn place_order(
        &self,
        customer: MemberUuid,
        seller: MemberUuid,
        selection: CheckoutSelection,
        now: Timestamp,
    ) -> Result<OrderRecord, CheckoutServiceError> {
        let mut tx = self.db.begin().await?;

        let seen = self
            .items_repository
            .get_cart_lines(&mut tx, customer, Some(seller))
            .await?;

        if seen.is_empty() {
            return Err(CheckoutError::EmptyCart.into());
        }

        let books = book_uuids(&seen);
        let locked = self.repository.lock_books(&mut tx, &books).await?;

        if let Some(taken) = locked.iter().find(|book| !book.is_available()) {
            warn!(
                book_uuid = %taken.uuid,
                state = %taken.state,
                "book was taken during checkout"
            );

            return Err(CheckoutServiceError::Conflict);
        }

        // Prices may have changed before the locks were granted.
        let lines = self
            .items_repository
            .get_cart_lines(&mut tx, customer, Some(seller))
            .await?;

        if locked.len() != books.len() || book_uuids(&lines) != books {
            return Err(CheckoutServiceError::Conflict);
        }

        let coupons = self.selected_coupons(&mut tx, seller, &selection).await?;

        let summary = compute_checkout(
            &checkout_lines(&lines),
            selection.shipping_method,
            &coupons,
            now,
        )?;

        let order = NewOrder {
            uuid: OrderUuid::new(),
            seller_uuid: seller,
            customer_uuid: customer,
            shipping_method: selection.shipping_method,
            summary,
        };

        Span::current().record("order_uuid", order.uuid.to_string());
        Span::current().record("total", order.summary.total);

        self.orders_repository.create_order(&mut tx, &order).await?;

        let claimed = self
            .repository
            .claim_books(&mut tx, order.uuid, &books)
            .await?;

        if usize::try_from(claimed).ok() != Some(books.len()) {
            warn!(claimed, expected = books.len(), "claimed fewer books than checked out");

            return Err(CheckoutServiceError::Conflict);
        }

        self.orders_repository
            .create_order_lines(&mut tx, order.uuid)
            .await?;

        let coupon_uuids: Vec<Uuid> = coupons
            .iter()
            .map(|coupon| coupon.uuid.into_uuid())
            .collect();

        self.repository
            .create_applied_discounts(&mut tx, order.uuid, &coupon_uuids)
            .await?;

        self.repository
            .delete_checked_out_items(&mut tx, customer, &books)
            .await?;

        let record = self.orders_repository.get_order(&mut tx, order.uuid).await?;

        tx.commit().await?;

        info!(books = claimed, coupons = coupon_uuids.len(), "placed order");

        Ok(record)
    }
}

#[automock]
#[async_trait]
pub trait CheckoutService: Send + Sync {
    /// Coupons the customer may pick for their cart with `seller`.
    async fn select_coupons(
        &self,
        customer: MemberUuid,
        seller: MemberUuid,
        now: Timestamp,
    ) -> Result<CouponEligibility<CouponRecord>, CheckoutServiceError>;

    /// Price the cart with `seller` without writing anything.
    async fn preview(
        &self,
        customer: MemberUuid,
        seller: MemberUuid,
        selection: CheckoutSelection,
        now: Timestamp,
    ) -> Result<CheckoutPreview, CheckoutServiceError>;

    /// Turn the cart with `seller` into an order.
    ///
    /// Books are claimed conditionally; if any was ordered concurrently the
    /// whole checkout rolls back with [`CheckoutServiceError::Conflict`].
    async fn place_order(
        &self,
        customer: MemberUuid,
        seller: MemberUuid,
        selection: CheckoutSelection,
        now: Timestamp,
    ) -> Result<OrderRecord, CheckoutServiceError>;
}
