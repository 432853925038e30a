//! Orders service.

use async_trait::async_trait;
use mockall::automock;
use readitagain::orders::{
    CancellationReply, OrderStatus, OrderStatusFilter, Party, Stars, resolve_cancellation,
};
use tracing::{Span, info};

use crate::{
    database::Db,
    domain::{
        members::records::MemberUuid,
        orders::{
            errors::OrdersServiceError,
            records::{OrderRecord, OrderUuid},
            repository::PgOrdersRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    repository: PgOrdersRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgOrdersRepository::new(),
        }
    }

    async fn list_orders(
        &self,
        member: MemberUuid,
        party: Party,
        filter: OrderStatusFilter,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let orders = self
            .repository
            .list_party_orders(&mut tx, member, party, filter.statuses())
            .await?;

        tx.commit().await?;

        Ok(orders)
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn list_customer_orders(
        &self,
        customer: MemberUuid,
        filter: OrderStatusFilter,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        self.list_orders(customer, Party::Customer, filter).await
    }

    async fn list_seller_orders(
        &self,
        seller: MemberUuid,
        filter: OrderStatusFilter,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        self.list_orders(seller, Party::Seller, filter).await
    }

    async fn get_order(
        &self,
        member: MemberUuid,
        party: Party,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.repository.get_order(&mut tx, order).await?;

        tx.commit().await?;

        if !record.involves(member, party) {
            return Err(OrdersServiceError::NotFound);
        }

        Ok(record)
    }

    #[tracing::instrument(
        name = "orders.service.advance_status",
        skip(self),
        fields(
            member_uuid = %member,
            party = %party,
            order_uuid = %order,
            from_status = tracing::field::Empty,
            to_status = tracing::field::Empty
        ),
        err
    )]
    async fn advance_status(
        &self,
        member: MemberUuid,
        party: Party,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self
            .repository
            .get_party_order_for_update(&mut tx, member, party, order)
            .await?;

        let next = current.status.advance(party)?;

        Span::current().record("from_status", current.status.label());
        Span::current().record("to_status", next.label());

        if next != current.status {
            self.repository.update_status(&mut tx, order, next).await?;

            if next == OrderStatus::Completed {
                let sold = self.repository.mark_books_sold(&mut tx, order).await?;

                info!(books = sold, "marked order books as sold");
            }
        }

        let record = self.repository.get_order(&mut tx, order).await?;

        tx.commit().await?;

        info!("advanced order status");

        Ok(record)
    }

    #[tracing::instrument(
        name = "orders.service.request_cancellation",
        skip(self, reason),
        fields(member_uuid = %member, party = %party, order_uuid = %order),
        err
    )]
    async fn request_cancellation(
        &self,
        member: MemberUuid,
        party: Party,
        order: OrderUuid,
        reason: String,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self
            .repository
            .get_party_order_for_update(&mut tx, member, party, order)
            .await?;

        let pending = current.status.request_cancellation(party)?;

        self.repository
            .request_cancellation(&mut tx, order, pending, &reason)
            .await?;

        let record = self.repository.get_order(&mut tx, order).await?;

        tx.commit().await?;

        info!(previous_status = %pending.previous, "requested order cancellation");

        Ok(record)
    }

    #[tracing::instrument(
        name = "orders.service.reply_cancellation",
        skip(self, message),
        fields(member_uuid = %member, party = %party, order_uuid = %order),
        err
    )]
    async fn reply_cancellation(
        &self,
        member: MemberUuid,
        party: Party,
        order: OrderUuid,
        accept: bool,
        message: String,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self
            .repository
            .get_party_order_for_update(&mut tx, member, party, order)
            .await?;

        let next = resolve_cancellation(
            current.status,
            current.pending_cancellation(),
            party,
            CancellationReply::from(accept),
        )?;

        self.repository
            .resolve_cancellation(&mut tx, order, next, &message)
            .await?;

        if next == OrderStatus::Cancelled {
            let released = self.repository.release_books(&mut tx, order).await?;

            info!(books = released, "released cancelled order books");
        }

        let record = self.repository.get_order(&mut tx, order).await?;

        tx.commit().await?;

        info!(status = %next, "replied to order cancellation");

        Ok(record)
    }

    #[tracing::instrument(
        name = "orders.service.comment",
        skip(self, comment),
        fields(customer_uuid = %customer, order_uuid = %order),
        err
    )]
    async fn comment(
        &self,
        customer: MemberUuid,
        order: OrderUuid,
        stars: u8,
        comment: String,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let stars = Stars::new(stars)?;

        let mut tx = self.db.begin().await?;

        let current = self
            .repository
            .get_party_order_for_update(&mut tx, customer, Party::Customer, order)
            .await?;

        current.status.ensure_reviewable(current.stars.is_some())?;

        self.repository
            .review_order(&mut tx, order, stars, &comment)
            .await?;

        let record = self.repository.get_order(&mut tx, order).await?;

        tx.commit().await?;

        info!("rated order");

        Ok(record)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Orders placed by `customer`, newest first.
    async fn list_customer_orders(
        &self,
        customer: MemberUuid,
        filter: OrderStatusFilter,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// Orders received by `seller`, newest first.
    async fn list_seller_orders(
        &self,
        seller: MemberUuid,
        filter: OrderStatusFilter,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// A single order, visible only to the member acting as `party` on it.
    async fn get_order(
        &self,
        member: MemberUuid,
        party: Party,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Move the order one step forward. Completing an order marks its books sold.
    async fn advance_status(
        &self,
        member: MemberUuid,
        party: Party,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Ask the other party to cancel the order.
    async fn request_cancellation(
        &self,
        member: MemberUuid,
        party: Party,
        order: OrderUuid,
        reason: String,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Accept or deny a pending cancellation request. Accepting puts the
    /// order's books back on sale.
    async fn reply_cancellation(
        &self,
        member: MemberUuid,
        party: Party,
        order: OrderUuid,
        accept: bool,
        message: String,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Rate a completed order once.
    async fn comment(
        &self,
        customer: MemberUuid,
        order: OrderUuid,
        stars: u8,
        comment: String,
    ) -> Result<OrderRecord, OrdersServiceError>;
}

#[cfg(test)]
mod tests {
    use readitagain::{books::BookState, orders::OrderStatusError};
    use testresult::TestResult;

    use crate::{
        domain::{books::BooksService, carts::CartsService},
        test::{
            TestContext,
            helpers::{place_order, register_member},
        },
    };

    use super::*;

    #[tokio::test]
    async fn seller_ships_and_customer_completes() -> TestResult {
        let ctx = TestContext::new().await;
        let seller = register_member(&ctx, "seller").await?;
        let customer = register_member(&ctx, "customer").await?;
        let order = place_order(&ctx, seller, customer, &[100, 50]).await?;

        assert_eq!(order.status, OrderStatus::ToShip);

        let shipped = ctx.orders.advance_status(seller, Party::Seller, order.uuid).await?;

        assert_eq!(shipped.status, OrderStatus::Shipping);
        assert!(
            shipped.lines.iter().all(|line| line.state == BookState::Ordered),
            "books stay ordered while shipping"
        );

        let completed = ctx
            .orders
            .advance_status(customer, Party::Customer, order.uuid)
            .await?;

        assert_eq!(completed.status, OrderStatus::Completed);
        assert!(
            completed.lines.iter().all(|line| line.state == BookState::Sold),
            "completing an order sells its books"
        );

        Ok(())
    }

    #[tokio::test]
    async fn customer_cannot_ship() -> TestResult {
        let ctx = TestContext::new().await;
        let seller = register_member(&ctx, "seller").await?;
        let customer = register_member(&ctx, "customer").await?;
        let order = place_order(&ctx, seller, customer, &[100]).await?;

        let result = ctx
            .orders
            .advance_status(customer, Party::Customer, order.uuid)
            .await;

        assert!(
            matches!(
                result,
                Err(OrdersServiceError::Rules(
                    OrderStatusError::InvalidTransition { .. }
                ))
            ),
            "expected InvalidTransition, got {result:?}"
        );

        let unchanged = ctx.orders.get_order(seller, Party::Seller, order.uuid).await?;

        assert_eq!(unchanged.status, OrderStatus::ToShip);

        Ok(())
    }

    #[tokio::test]
    async fn wrong_party_does_not_see_the_order() -> TestResult {
        let ctx = TestContext::new().await;
        let seller = register_member(&ctx, "seller").await?;
        let customer = register_member(&ctx, "customer").await?;
        let stranger = register_member(&ctx, "stranger").await?;
        let order = place_order(&ctx, seller, customer, &[100]).await?;

        let as_seller = ctx
            .orders
            .advance_status(customer, Party::Seller, order.uuid)
            .await;

        assert!(
            matches!(as_seller, Err(OrdersServiceError::NotFound)),
            "expected NotFound, got {as_seller:?}"
        );

        let as_stranger = ctx.orders.get_order(stranger, Party::Customer, order.uuid).await;

        assert!(
            matches!(as_stranger, Err(OrdersServiceError::NotFound)),
            "expected NotFound, got {as_stranger:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn denied_cancellation_restores_previous_status() -> TestResult {
        let ctx = TestContext::new().await;
        let seller = register_member(&ctx, "seller").await?;
        let customer = register_member(&ctx, "customer").await?;
        let order = place_order(&ctx, seller, customer, &[100]).await?;

        ctx.orders.advance_status(seller, Party::Seller, order.uuid).await?;

        let cancelling = ctx
            .orders
            .request_cancellation(customer, Party::Customer, order.uuid, "changed my mind".into())
            .await?;

        assert_eq!(cancelling.status, OrderStatus::Cancelling);
        assert_eq!(cancelling.cancel_reason.as_deref(), Some("changed my mind"));

        let own_reply = ctx
            .orders
            .reply_cancellation(customer, Party::Customer, order.uuid, true, String::new())
            .await;

        assert!(
            matches!(
                own_reply,
                Err(OrdersServiceError::Rules(OrderStatusError::NotCounterparty))
            ),
            "expected NotCounterparty, got {own_reply:?}"
        );

        let denied = ctx
            .orders
            .reply_cancellation(seller, Party::Seller, order.uuid, false, "already sent".into())
            .await?;

        assert_eq!(denied.status, OrderStatus::Shipping);
        assert_eq!(denied.cancel_reply.as_deref(), Some("already sent"));
        assert_eq!(denied.cancel_reason, None);
        assert_eq!(denied.pending_cancellation(), None);

        Ok(())
    }

    #[tokio::test]
    async fn accepted_cancellation_is_terminal() -> TestResult {
        let ctx = TestContext::new().await;
        let seller = register_member(&ctx, "seller").await?;
        let customer = register_member(&ctx, "customer").await?;
        let order = place_order(&ctx, seller, customer, &[100]).await?;

        ctx.orders
            .request_cancellation(seller, Party::Seller, order.uuid, "out of stock".into())
            .await?;

        let cancelled = ctx
            .orders
            .reply_cancellation(customer, Party::Customer, order.uuid, true, "ok".into())
            .await?;

        assert_eq!(cancelled.status, OrderStatus::Cancelled);
        assert_eq!(cancelled.cancel_reason.as_deref(), Some("out of stock"));

        let advanced = ctx
            .orders
            .advance_status(seller, Party::Seller, order.uuid)
            .await;

        assert!(
            matches!(advanced, Err(OrdersServiceError::Rules(_))),
            "expected a rules error, got {advanced:?}"
        );

        let unchanged = ctx.orders.get_order(customer, Party::Customer, order.uuid).await?;

        assert_eq!(unchanged.status, OrderStatus::Cancelled);

        let cancellations = ctx
            .orders
            .list_customer_orders(customer, OrderStatusFilter::Cancellation)
            .await?;

        assert_eq!(cancellations.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn accepted_cancellation_puts_books_back_on_sale() -> TestResult {
        let ctx = TestContext::new().await;
        let seller = register_member(&ctx, "seller").await?;
        let customer = register_member(&ctx, "customer").await?;
        let order = place_order(&ctx, seller, customer, &[100, 40]).await?;

        let kept = order.lines[0].book_uuid;
        let deleted = order.lines[1].book_uuid;

        ctx.orders
            .request_cancellation(customer, Party::Customer, order.uuid, "wrong book".into())
            .await?;

        let cancelled = ctx
            .orders
            .reply_cancellation(seller, Party::Seller, order.uuid, true, "ok".into())
            .await?;

        assert_eq!(cancelled.status, OrderStatus::Cancelled);
        assert_eq!(cancelled.lines.len(), 2, "lines survive the release");
        assert_eq!(cancelled.books_total, 140);
        assert!(
            cancelled.lines.iter().all(|line| line.state == BookState::OnSale),
            "cancelled order books are back on sale"
        );

        let item = ctx.carts.add_book(customer, kept).await?;

        assert_eq!(item.book_uuid, kept);

        ctx.books.delete_book(seller, deleted).await?;

        let history = ctx.orders.get_order(customer, Party::Customer, order.uuid).await?;

        assert_eq!(history.lines.len(), 2);
        assert_eq!(history.total_count, 2);

        Ok(())
    }

    #[tokio::test]
    async fn completed_order_can_be_rated_once() -> TestResult {
        let ctx = TestContext::new().await;
        let seller = register_member(&ctx, "seller").await?;
        let customer = register_member(&ctx, "customer").await?;
        let order = place_order(&ctx, seller, customer, &[100]).await?;

        let early = ctx.orders.comment(customer, order.uuid, 5, "great".into()).await;

        assert!(
            matches!(
                early,
                Err(OrdersServiceError::Rules(OrderStatusError::NotReviewable(
                    OrderStatus::ToShip
                )))
            ),
            "expected NotReviewable, got {early:?}"
        );

        ctx.orders.advance_status(seller, Party::Seller, order.uuid).await?;
        ctx.orders.advance_status(seller, Party::Seller, order.uuid).await?;

        let rated = ctx.orders.comment(customer, order.uuid, 4, "great".into()).await?;

        assert_eq!(rated.stars.map(Stars::get), Some(4));
        assert_eq!(rated.comment.as_deref(), Some("great"));

        let again = ctx.orders.comment(customer, order.uuid, 1, "meh".into()).await;

        assert!(
            matches!(
                again,
                Err(OrdersServiceError::Rules(OrderStatusError::AlreadyReviewed))
            ),
            "expected AlreadyReviewed, got {again:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn listings_are_filtered_and_scoped_by_party() -> TestResult {
        let ctx = TestContext::new().await;
        let seller = register_member(&ctx, "seller").await?;
        let customer = register_member(&ctx, "customer").await?;
        let first = place_order(&ctx, seller, customer, &[100]).await?;
        let second = place_order(&ctx, seller, customer, &[30]).await?;

        ctx.orders.advance_status(seller, Party::Seller, first.uuid).await?;

        let to_ship = ctx
            .orders
            .list_seller_orders(seller, OrderStatusFilter::ToShip)
            .await?;

        let to_ship: Vec<OrderUuid> = to_ship.iter().map(|order| order.uuid).collect();

        assert_eq!(to_ship, [second.uuid]);

        let all = ctx
            .orders
            .list_customer_orders(customer, OrderStatusFilter::All)
            .await?;

        let all: Vec<OrderUuid> = all.iter().map(|order| order.uuid).collect();

        assert_eq!(all, [second.uuid, first.uuid]);

        let as_customer = ctx
            .orders
            .list_customer_orders(seller, OrderStatusFilter::All)
            .await?;

        assert!(as_customer.is_empty(), "seller has placed no orders");

        Ok(())
    }
}
