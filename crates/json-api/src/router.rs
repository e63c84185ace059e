//! App Router

use salvo::Router;

use crate::{carts, orders};

/// Cart and order routes.
pub(crate) fn app_router() -> Router {
    Router::new()
        .push(
            Router::with_path("carts").post(carts::create::handler).push(
                Router::with_path("{cart}")
                    .get(carts::get::handler)
                    .delete(carts::delete::handler)
                    .push(Router::with_path("checkout").post(orders::checkout::handler))
                    .push(
                        Router::with_path("items/{item}")
                            .patch(carts::items::add::handler)
                            .delete(carts::items::remove::handler)
                            .push(
                                Router::with_path("subtract")
                                    .patch(carts::items::subtract::handler),
                            ),
                    ),
            ),
        )
        .push(Router::with_path("orders/{order}").get(orders::get::handler))
}
