//! Checkout totals across every coupon combination.

use jiff::{SignedDuration, Timestamp};
use rust_decimal::Decimal;
use testresult::TestResult;

use readitagain::prelude::*;

fn now() -> Timestamp {
    Timestamp::UNIX_EPOCH + SignedDuration::from_hours(24 * 365 * 55)
}

fn coupon(code: &str, kind: CouponKind, rate: Decimal) -> Coupon {
    Coupon {
        code: code.to_owned(),
        kind,
        rate,
        minimum: 0,
        start_at: now() - SignedDuration::from_hours(24),
        end_at: now() + SignedDuration::from_hours(24),
        is_active: true,
    }
}

fn cart() -> Vec<CheckoutLine> {
    vec![
        CheckoutLine {
            price: 250,
            discount_code: Some("FAIR".to_owned()),
        },
        CheckoutLine {
            price: 180,
            discount_code: None,
        },
        CheckoutLine {
            price: 75,
            discount_code: None,
        },
    ]
}

#[test]
fn total_is_books_plus_fee_minus_discount_for_every_combination() -> TestResult {
    let fair = coupon("FAIR", CouponKind::SpecialEvent, Decimal::ZERO);
    let season = coupon("SEASON", CouponKind::Seasoning, Decimal::new(2, 1));
    let free = coupon("FREE", CouponKind::ShippingFee, Decimal::ZERO);

    let lines = cart();
    let books_total = 505;

    // 505 * 0.2 = 101
    let season_off = 101;

    let combinations: [(&[&Coupon], u64, u64); 8] = [
        (&[], 0, 120),
        (&[&fair], 0, 120),
        (&[&season], season_off, 120),
        (&[&free], 0, 0),
        (&[&fair, &season], season_off, 120),
        (&[&fair, &free], 0, 0),
        (&[&season, &free], season_off, 0),
        (&[&fair, &season, &free], season_off, 0),
    ];

    for (coupons, discount, fee) in combinations {
        let owned: Vec<Coupon> = coupons.iter().map(|&coupon| coupon.clone()).collect();

        let summary = compute_checkout(&lines, ShippingMethod::HomeDelivery, &owned, now())?;

        assert_eq!(summary.books_total, books_total);
        assert_eq!(summary.discount_amount, discount, "discount for {coupons:?}");
        assert_eq!(summary.shipping_fee, fee, "fee for {coupons:?}");
        assert_eq!(
            summary.total,
            summary.books_total + summary.shipping_fee - summary.discount_amount,
            "total for {coupons:?}"
        );
        assert_eq!(summary.total_count, 3);
        assert_eq!(summary.coupon_codes.len(), coupons.len());
    }

    Ok(())
}

#[test]
fn coupon_order_does_not_change_amounts() -> TestResult {
    let season = coupon("SEASON", CouponKind::Seasoning, Decimal::new(30, 0));
    let free = coupon("FREE", CouponKind::ShippingFee, Decimal::ZERO);

    let forward = compute_checkout(
        &cart(),
        ShippingMethod::SevenEleven,
        &[season.clone(), free.clone()],
        now(),
    )?;

    let backward = compute_checkout(&cart(), ShippingMethod::SevenEleven, &[free, season], now())?;

    assert_eq!(forward.total, backward.total);
    assert_eq!(forward.total, 505 - 30);
    assert_eq!(
        forward.coupon_codes.as_slice(),
        ["SEASON".to_owned(), "FREE".to_owned()]
    );
    assert_eq!(
        backward.coupon_codes.as_slice(),
        ["FREE".to_owned(), "SEASON".to_owned()]
    );

    Ok(())
}

#[test]
fn eligibility_listing_never_offers_what_checkout_refuses() {
    let mut coupons = vec![
        coupon("FAIR", CouponKind::SpecialEvent, Decimal::ZERO),
        coupon("SEASON", CouponKind::Seasoning, Decimal::new(1, 1)),
        coupon("FREE", CouponKind::ShippingFee, Decimal::ZERO),
        coupon("NOMATCH", CouponKind::SpecialEvent, Decimal::ZERO),
    ];

    let mut dormant = coupon("DORMANT", CouponKind::Seasoning, Decimal::new(1, 1));
    dormant.is_active = false;
    coupons.push(dormant);

    let lines = cart();
    let eligibility = eligible_coupons(coupons.iter(), &lines, now());

    let offered = eligibility
        .special_event
        .iter()
        .chain(&eligibility.seasoning)
        .chain(&eligibility.shipping_fee)
        .filter(|entry| entry.usable);

    for entry in offered {
        let result = compute_checkout(
            &lines,
            ShippingMethod::HiLife,
            std::slice::from_ref(entry.coupon),
            now(),
        );

        assert!(result.is_ok(), "{} was offered but refused", entry.coupon.code);
    }

    let offered_codes: Vec<&str> = eligibility
        .special_event
        .iter()
        .chain(&eligibility.seasoning)
        .chain(&eligibility.shipping_fee)
        .map(|entry| entry.coupon.code.as_str())
        .collect();

    assert!(!offered_codes.contains(&"DORMANT"), "inactive coupon offered");
    assert!(!offered_codes.contains(&"NOMATCH"), "unmatched event offered");
}
