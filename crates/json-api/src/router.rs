//! App Router

use salvo::Router;

use crate::{addresses, auth, books, carts, checkout, images, orders, profile, seller_page};

/// Routes anyone may call.
pub fn public_router() -> Router {
    Router::new()
        .push(Router::with_path("register").post(auth::handlers::register::handler))
        .push(Router::with_path("token").post(auth::handlers::token::handler))
        .push(
            Router::with_path("books")
                .get(books::search::handler)
                .push(Router::with_path("{book}").get(books::get::handler)),
        )
        .push(Router::with_path("images/{file}").get(images::handler))
}

/// Routes behind the access token middleware.
pub fn app_router() -> Router {
    Router::new()
        .hoop(auth::middleware::handler)
        .push(Router::with_path("add-to-cart").post(carts::add::handler))
        .push(Router::with_path("remove-from-cart/{book}").delete(carts::remove::handler))
        .push(
            Router::with_path("show-cart")
                .push(Router::with_path("all").get(carts::show_all::handler))
                .push(Router::with_path("{seller_id}").get(carts::show_seller::handler)),
        )
        .push(
            Router::with_path("checkout")
                .push(
                    Router::with_path("select-coupon/{seller_id}")
                        .get(checkout::select_coupon::handler),
                )
                .push(Router::with_path("{seller_id}").post(checkout::preview::handler)),
        )
        .push(
            Router::with_path("checkout-to-order/{seller_id}")
                .post(checkout::place_order::handler),
        )
        .push(Router::with_path("customer/orders").get(orders::customer_index::handler))
        .push(Router::with_path("seller/orders").get(orders::seller_index::handler))
        .push(Router::with_path("orders/{person}/{order_id}").get(orders::get::handler))
        .push(
            Router::with_path("update_orders_status/{person}/{order_id}")
                .post(orders::advance::handler),
        )
        .push(
            Router::with_path("cancel_orders/{person}/{order_id}")
                .post(orders::cancel::handler)
                .push(Router::with_path("reply").post(orders::reply::handler)),
        )
        .push(Router::with_path("comment/{order_id}").post(orders::comment::handler))
        .push(
            Router::with_path("seller_page")
                .push(
                    Router::with_path("coupon")
                        .get(seller_page::coupons::index::handler)
                        .post(seller_page::coupons::create::handler)
                        .push(
                            Router::with_path("{coupon}")
                                .put(seller_page::coupons::update::handler)
                                .delete(seller_page::coupons::delete::handler)
                                .push(
                                    Router::with_path("active")
                                        .post(seller_page::coupons::active::handler),
                                ),
                        ),
                )
                .push(
                    Router::with_path("book")
                        .get(seller_page::books::index::handler)
                        .post(seller_page::books::create::handler)
                        .push(
                            Router::with_path("{book}")
                                .put(seller_page::books::update::handler)
                                .delete(seller_page::books::delete::handler)
                                .push(
                                    Router::with_path("picture")
                                        .post(seller_page::books::picture::handler),
                                ),
                        ),
                ),
        )
        .push(
            Router::with_path("profile")
                .get(profile::get::handler)
                .put(profile::update::handler)
                .push(Router::with_path("avatar").post(profile::avatar::handler)),
        )
        .push(
            Router::with_path("addresses")
                .get(addresses::index::handler)
                .post(addresses::create::handler)
                .push(Router::with_path("{address}").delete(addresses::delete::handler)),
        )
}
