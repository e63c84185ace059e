//! Remove Cart Item Handler

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use storefront_app::domain::{carts::models::CartUuid, items::models::ItemUuid};

use crate::{carts::errors::into_status_error, extensions::*};

/// Remove Cart Item Handler
#[endpoint(
    tags("carts"),
    summary = "Remove Item from Cart",
    responses(
        (status_code = StatusCode::OK, description = "Item removed"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart or cart line not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    )
)]
#[tracing::instrument(
    name = "carts.items.remove",
    skip(cart, item, depot),
    fields(cart_uuid = tracing::field::Empty, item_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    cart: PathParam<Uuid>,
    item: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let app = depot.app()?;
    let cart = CartUuid::from_uuid(cart.into_inner());
    let item = ItemUuid::from_uuid(item.into_inner());

    let span = tracing::Span::current();

    span.record("cart_uuid", tracing::field::display(cart));
    span.record("item_uuid", tracing::field::display(item));

    app.carts
        .remove_item(cart, item)
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::OK)
}
