//! Subtract Cart Item Handler

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::{carts::models::CartUuid, items::models::ItemUuid};

use crate::{
    carts::{CartLineResponse, errors::into_status_error},
    extensions::*,
};

/// Cart Item Subtracted Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemSubtractedResponse {
    /// Total units now in the cart
    pub count: u64,

    /// The updated line
    pub line: CartLineResponse,
}

/// Subtract Cart Item Handler
///
/// Removes one unit of the item. Quantities stop at zero.
#[endpoint(
    tags("carts"),
    summary = "Subtract Item from Cart",
    responses(
        (status_code = StatusCode::OK, description = "Item subtracted"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart or item not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "carts.items.subtract",
    skip(cart, item, depot),
    fields(cart_uuid = tracing::field::Empty, item_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    cart: PathParam<Uuid>,
    item: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CartItemSubtractedResponse>, StatusError> {
    let app = depot.app()?;
    let cart = CartUuid::from_uuid(cart.into_inner());
    let item = ItemUuid::from_uuid(item.into_inner());

    let span = tracing::Span::current();

    span.record("cart_uuid", tracing::field::display(cart));
    span.record("item_uuid", tracing::field::display(item));

    let line = app
        .carts
        .subtract_item(cart, item)
        .await
        .map_err(into_status_error)?;

    let count = app.carts.count(cart).await.map_err(into_status_error)?;

    Ok(Json(CartItemSubtractedResponse {
        count,
        line: line.into(),
    }))
}
