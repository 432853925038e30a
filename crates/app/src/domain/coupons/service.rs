//! Coupons service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use readitagain::coupons::PhaseFilter;
use sqlx::{Postgres, Transaction};
use tracing::info;

use crate::{
    database::Db,
    domain::{
        coupons::{
            data::{CouponTerms, NewCoupon},
            errors::CouponsServiceError,
            records::{CouponRecord, CouponUuid},
            repository::PgCouponsRepository,
        },
        members::records::MemberUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgCouponsService {
    db: Db,
    repository: PgCouponsRepository,
}

impl PgCouponsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCouponsRepository::new(),
        }
    }

    /// Lock a seller's coupon and refuse if an order has used it.
    async fn lock_unfrozen(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        seller: MemberUuid,
        coupon: CouponUuid,
    ) -> Result<CouponRecord, CouponsServiceError> {
        let record = self
            .repository
            .get_seller_coupon_for_update(tx, seller, coupon)
            .await?;

        if record.applied {
            return Err(CouponsServiceError::Frozen);
        }

        Ok(record)
    }
}

#[async_trait]
impl CouponsService for PgCouponsService {
    async fn list_coupons(
        &self,
        seller: MemberUuid,
        filter: PhaseFilter,
        now: Timestamp,
    ) -> Result<Vec<CouponRecord>, CouponsServiceError> {
        let mut tx = self.db.begin().await?;

        let coupons = self.repository.list_seller_coupons(&mut tx, seller).await?;

        tx.commit().await?;

        Ok(coupons
            .into_iter()
            .filter(|coupon| filter.matches(coupon.rules.phase(now)))
            .collect())
    }

    #[tracing::instrument(
        name = "coupons.service.create_coupon",
        skip(self, coupon),
        fields(
            seller_uuid = %seller,
            coupon_uuid = %coupon.uuid,
            code = %coupon.terms.code,
            kind = %coupon.terms.kind
        ),
        err
    )]
    async fn create_coupon(
        &self,
        seller: MemberUuid,
        coupon: NewCoupon,
    ) -> Result<CouponRecord, CouponsServiceError> {
        coupon.terms.validate()?;

        let mut tx = self.db.begin().await?;

        let record = self
            .repository
            .create_coupon(
                &mut tx,
                seller,
                coupon.uuid,
                &coupon.terms,
                coupon.is_active,
            )
            .await?;

        tx.commit().await?;

        info!(coupon_uuid = %record.uuid, "created coupon");

        Ok(record)
    }

    #[tracing::instrument(
        name = "coupons.service.update_coupon",
        skip(self, terms),
        fields(seller_uuid = %seller, coupon_uuid = %coupon),
        err
    )]
    async fn update_coupon(
        &self,
        seller: MemberUuid,
        coupon: CouponUuid,
        terms: CouponTerms,
    ) -> Result<CouponRecord, CouponsServiceError> {
        terms.validate()?;

        let mut tx = self.db.begin().await?;

        self.lock_unfrozen(&mut tx, seller, coupon).await?;

        let record = self
            .repository
            .update_coupon(&mut tx, seller, coupon, &terms)
            .await?;

        tx.commit().await?;

        info!(coupon_uuid = %coupon, "updated coupon");

        Ok(record)
    }

    #[tracing::instrument(
        name = "coupons.service.delete_coupon",
        skip(self),
        fields(seller_uuid = %seller, coupon_uuid = %coupon),
        err
    )]
    async fn delete_coupon(
        &self,
        seller: MemberUuid,
        coupon: CouponUuid,
    ) -> Result<(), CouponsServiceError> {
        let mut tx = self.db.begin().await?;

        self.lock_unfrozen(&mut tx, seller, coupon).await?;

        let rows_affected = self
            .repository
            .delete_coupon(&mut tx, seller, coupon)
            .await?;

        if rows_affected == 0 {
            return Err(CouponsServiceError::NotFound);
        }

        tx.commit().await?;

        info!(coupon_uuid = %coupon, "deleted coupon");

        Ok(())
    }

    #[tracing::instrument(
        name = "coupons.service.set_active",
        skip(self),
        fields(seller_uuid = %seller, coupon_uuid = %coupon, is_active),
        err
    )]
    async fn set_active(
        &self,
        seller: MemberUuid,
        coupon: CouponUuid,
        is_active: bool,
    ) -> Result<CouponRecord, CouponsServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self
            .repository
            .set_coupon_active(&mut tx, seller, coupon, is_active)
            .await?;

        tx.commit().await?;

        info!(coupon_uuid = %coupon, is_active, "toggled coupon");

        Ok(record)
    }
}

#[automock]
#[async_trait]
pub trait CouponsService: Send + Sync {
    /// List a seller's coupons whose phase at `now` passes the filter.
    async fn list_coupons(
        &self,
        seller: MemberUuid,
        filter: PhaseFilter,
        now: Timestamp,
    ) -> Result<Vec<CouponRecord>, CouponsServiceError>;

    /// Creates a new coupon. Codes are unique across all sellers.
    async fn create_coupon(
        &self,
        seller: MemberUuid,
        coupon: NewCoupon,
    ) -> Result<CouponRecord, CouponsServiceError>;

    /// Replace the terms of a coupon no order has used yet.
    async fn update_coupon(
        &self,
        seller: MemberUuid,
        coupon: CouponUuid,
        terms: CouponTerms,
    ) -> Result<CouponRecord, CouponsServiceError>;

    /// Delete a coupon no order has used yet.
    async fn delete_coupon(
        &self,
        seller: MemberUuid,
        coupon: CouponUuid,
    ) -> Result<(), CouponsServiceError>;

    /// Switch a coupon on or off for future checkouts.
    async fn set_active(
        &self,
        seller: MemberUuid,
        coupon: CouponUuid,
        is_active: bool,
    ) -> Result<CouponRecord, CouponsServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::SignedDuration;
    use readitagain::{
        coupons::{CouponKind, CouponPhase, CouponTermsError},
        shipping::ShippingMethod,
    };
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::{
        domain::{
            books::{BooksService, data::NewBook, records::BookUuid},
            carts::CartsService,
            checkout::{CheckoutService, data::CheckoutSelection},
        },
        test::{
            TestContext,
            helpers::{book_details, coupon_terms, create_coupon, register_member},
        },
    };

    use super::*;

    #[tokio::test]
    async fn create_coupon_round_trips_terms() -> TestResult {
        let ctx = TestContext::new().await;
        let seller = register_member(&ctx, "seller").await?;

        let mut terms = coupon_terms("SPRING", CouponKind::Seasoning);
        terms.rate = Decimal::new(15, 2);
        terms.minimum = 300;

        let record = ctx
            .coupons
            .create_coupon(
                seller,
                NewCoupon {
                    uuid: CouponUuid::new(),
                    terms: terms.clone(),
                    is_active: true,
                },
            )
            .await?;

        assert_eq!(record.rules.code, "SPRING");
        assert_eq!(record.rules.kind, CouponKind::Seasoning);
        assert_eq!(record.rules.rate, Decimal::new(15, 2));
        assert_eq!(record.rules.minimum, 300);
        assert_eq!(record.rules.start_at, terms.start_at);
        assert!(!record.applied);

        Ok(())
    }

    #[tokio::test]
    async fn duplicate_code_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;
        let seller = register_member(&ctx, "seller").await?;
        let other = register_member(&ctx, "other").await?;

        create_coupon(&ctx, seller, "TAKEN", CouponKind::ShippingFee).await?;

        let result = create_coupon(&ctx, other, "TAKEN", CouponKind::ShippingFee).await;

        assert!(
            matches!(result, Err(CouponsServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn invalid_terms_are_rejected_before_storage() -> TestResult {
        let ctx = TestContext::new().await;
        let seller = register_member(&ctx, "seller").await?;

        let mut terms = coupon_terms("BACKWARDS", CouponKind::ShippingFee);
        terms.end_at = terms.start_at - SignedDuration::from_hours(1);

        let result = ctx
            .coupons
            .create_coupon(
                seller,
                NewCoupon {
                    uuid: CouponUuid::new(),
                    terms,
                    is_active: true,
                },
            )
            .await;

        assert!(
            matches!(
                result,
                Err(CouponsServiceError::Terms(CouponTermsError::InvalidWindow))
            ),
            "expected InvalidWindow, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn list_coupons_filters_by_phase() -> TestResult {
        let ctx = TestContext::new().await;
        let seller = register_member(&ctx, "seller").await?;

        let now = Timestamp::now();

        let mut upcoming = coupon_terms("LATER", CouponKind::ShippingFee);
        upcoming.start_at = now + SignedDuration::from_hours(24);
        upcoming.end_at = now + SignedDuration::from_hours(48);

        let mut expired = coupon_terms("EARLIER", CouponKind::ShippingFee);
        expired.start_at = now - SignedDuration::from_hours(48);
        expired.end_at = now - SignedDuration::from_hours(24);

        let ongoing = coupon_terms("NOW", CouponKind::ShippingFee);

        for terms in [upcoming, expired, ongoing] {
            ctx.coupons
                .create_coupon(
                    seller,
                    NewCoupon {
                        uuid: CouponUuid::new(),
                        terms,
                        is_active: true,
                    },
                )
                .await?;
        }

        let all = ctx
            .coupons
            .list_coupons(seller, PhaseFilter::All, now)
            .await?;

        assert_eq!(all.len(), 3);

        let only_upcoming = ctx
            .coupons
            .list_coupons(seller, PhaseFilter::Only(CouponPhase::Upcoming), now)
            .await?;

        let codes: Vec<&str> = only_upcoming
            .iter()
            .map(|coupon| coupon.rules.code.as_str())
            .collect();

        assert_eq!(codes, ["LATER"]);

        Ok(())
    }

    #[tokio::test]
    async fn another_sellers_coupon_reads_as_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let seller = register_member(&ctx, "seller").await?;
        let other = register_member(&ctx, "other").await?;

        let coupon = create_coupon(&ctx, seller, "MINE", CouponKind::ShippingFee).await?;

        let update = ctx
            .coupons
            .update_coupon(
                other,
                coupon.uuid,
                coupon_terms("STOLEN", CouponKind::ShippingFee),
            )
            .await;

        assert!(
            matches!(update, Err(CouponsServiceError::NotFound)),
            "expected NotFound, got {update:?}"
        );

        let delete = ctx.coupons.delete_coupon(other, coupon.uuid).await;

        assert!(
            matches!(delete, Err(CouponsServiceError::NotFound)),
            "expected NotFound, got {delete:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn event_coupon_on_an_ordered_book_is_frozen() -> TestResult {
        let ctx = TestContext::new().await;
        let seller = register_member(&ctx, "seller").await?;
        let customer = register_member(&ctx, "customer").await?;

        let coupon = create_coupon(&ctx, seller, "FAIR", CouponKind::SpecialEvent).await?;

        let mut details = book_details("isbn-fair", 120);
        details.discount_code = Some("FAIR".to_string());

        let book = ctx
            .books
            .create_book(
                seller,
                NewBook {
                    uuid: BookUuid::new(),
                    details,
                },
            )
            .await?;

        let mut renamed = coupon_terms("FAIR", CouponKind::SpecialEvent);
        renamed.name = "Book fair".to_string();

        let listed = ctx
            .coupons
            .update_coupon(seller, coupon.uuid, renamed)
            .await?;

        assert!(!listed.applied, "an on-sale book does not freeze its coupon");

        ctx.carts.add_book(customer, book.uuid).await?;
        ctx.checkout
            .place_order(
                customer,
                seller,
                CheckoutSelection {
                    shipping_method: ShippingMethod::SevenEleven,
                    coupon_codes: Vec::new(),
                },
                Timestamp::now(),
            )
            .await?;

        let update = ctx
            .coupons
            .update_coupon(seller, coupon.uuid, coupon_terms("FAIR2", CouponKind::SpecialEvent))
            .await;

        assert!(
            matches!(update, Err(CouponsServiceError::Frozen)),
            "expected Frozen, got {update:?}"
        );

        let delete = ctx.coupons.delete_coupon(seller, coupon.uuid).await;

        assert!(
            matches!(delete, Err(CouponsServiceError::Frozen)),
            "expected Frozen, got {delete:?}"
        );

        let ordered = ctx.books.get_book(book.uuid).await?;

        assert_eq!(ordered.discount_code.as_deref(), Some("FAIR"));

        Ok(())
    }

    #[tokio::test]
    async fn set_active_toggles_availability() -> TestResult {
        let ctx = TestContext::new().await;
        let seller = register_member(&ctx, "seller").await?;

        let coupon = create_coupon(&ctx, seller, "TOGGLE", CouponKind::ShippingFee).await?;

        let off = ctx.coupons.set_active(seller, coupon.uuid, false).await?;

        assert!(!off.rules.is_active);
        assert!(!off.rules.is_redeemable(Timestamp::now()));

        Ok(())
    }
}
