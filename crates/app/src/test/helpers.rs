//! Test Helpers

use jiff::{SignedDuration, Timestamp};
use readitagain::{coupons::CouponKind, shipping::ShippingMethod};
use rust_decimal::Decimal;
use zeroize::Zeroizing;

use crate::{
    auth::{AuthService, AuthServiceError, NewMember},
    domain::{
        books::{
            BooksService, BooksServiceError,
            data::{BookDetails, NewBook},
            records::{BookRecord, BookUuid},
        },
        carts::CartsService,
        checkout::{CheckoutService, CheckoutServiceError, data::CheckoutSelection},
        coupons::{
            CouponsService, CouponsServiceError,
            data::{CouponTerms, NewCoupon},
            records::{CouponRecord, CouponUuid},
        },
        members::records::MemberUuid,
        orders::records::OrderRecord,
    },
    test::TestContext,
};

pub(crate) const TEST_PASSWORD: &str = "correct horse battery";

pub(crate) fn new_member(username: &str) -> NewMember {
    NewMember {
        uuid: MemberUuid::new(),
        username: username.to_string(),
        email: format!("{username}@example.com"),
        password: Zeroizing::new(TEST_PASSWORD.to_string()),
        display_name: None,
    }
}

pub(crate) async fn register_member(
    ctx: &TestContext,
    username: &str,
) -> Result<MemberUuid, AuthServiceError> {
    let record = ctx.auth.register(new_member(username)).await?;

    Ok(record.uuid)
}

pub(crate) fn book_details(isbn: &str, price: u64) -> BookDetails {
    BookDetails {
        isbn: isbn.to_string(),
        name: format!("Book {isbn}"),
        condition: "like new".to_string(),
        price,
        shipping_location: "Taipei".to_string(),
        shipping_method: ShippingMethod::SevenEleven,
        discount_code: None,
        description: String::new(),
        category: "fiction".to_string(),
    }
}

pub(crate) async fn create_book(
    ctx: &TestContext,
    seller: MemberUuid,
    isbn: &str,
    price: u64,
) -> Result<BookRecord, BooksServiceError> {
    ctx.books
        .create_book(
            seller,
            NewBook {
                uuid: BookUuid::new(),
                details: book_details(isbn, price),
            },
        )
        .await
}

/// Terms valid from a day ago until a day from now, truncated to whole seconds so
/// they survive a database round trip unchanged.
pub(crate) fn coupon_terms(code: &str, kind: CouponKind) -> CouponTerms {
    let now = Timestamp::from_second(Timestamp::now().as_second())
        .expect("whole seconds of a valid timestamp are valid");

    CouponTerms {
        code: code.to_string(),
        name: format!("{code} coupon"),
        kind,
        rate: Decimal::new(1, 1),
        minimum: 0,
        start_at: now - SignedDuration::from_hours(24),
        end_at: now + SignedDuration::from_hours(24),
        description: String::new(),
    }
}

pub(crate) async fn create_coupon_with_terms(
    ctx: &TestContext,
    seller: MemberUuid,
    terms: CouponTerms,
) -> Result<CouponRecord, CouponsServiceError> {
    ctx.coupons
        .create_coupon(
            seller,
            NewCoupon {
                uuid: CouponUuid::new(),
                terms,
                is_active: true,
            },
        )
        .await
}

pub(crate) async fn create_coupon(
    ctx: &TestContext,
    seller: MemberUuid,
    code: &str,
    kind: CouponKind,
) -> Result<CouponRecord, CouponsServiceError> {
    create_coupon_with_terms(ctx, seller, coupon_terms(code, kind)).await
}

/// List one book per price for `seller`, put them in `customer`'s cart and check
/// out without coupons.
pub(crate) async fn place_order(
    ctx: &TestContext,
    seller: MemberUuid,
    customer: MemberUuid,
    prices: &[u64],
) -> Result<OrderRecord, CheckoutServiceError> {
    for price in prices {
        let isbn = format!("isbn-{}", uuid::Uuid::now_v7().simple());

        let book = create_book(ctx, seller, &isbn, *price)
            .await
            .expect("Failed to create book for order");

        ctx.carts
            .add_book(customer, book.uuid)
            .await
            .expect("Failed to add book to cart");
    }

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
        .await
}
