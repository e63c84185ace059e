//! Add Cart Item Handler

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::{
    carts::models::{CartLineSummary, CartUuid},
    items::models::ItemUuid,
};

use crate::{
    carts::{CartLineResponse, errors::into_status_error},
    extensions::*,
};

/// Cart Item Added Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemAddedResponse {
    /// Confirmation for the shopper
    pub message: String,

    /// Total units now in the cart
    pub count: u64,

    /// The updated line
    pub line: CartLineResponse,
}

/// Add Cart Item Handler
///
/// Adds one unit of the item unless the cart already holds all of its stock.
#[endpoint(
    tags("carts"),
    summary = "Add Item to Cart",
    responses(
        (status_code = StatusCode::OK, description = "Item added"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart or item not found"),
        (status_code = StatusCode::CONFLICT, description = "Cart already holds all units in stock"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "carts.items.add",
    skip(cart, item, depot),
    fields(
        cart_uuid = tracing::field::Empty,
        item_uuid = tracing::field::Empty,
        quantity = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    cart: PathParam<Uuid>,
    item: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CartItemAddedResponse>, StatusError> {
    let app = depot.app()?;
    let cart = CartUuid::from_uuid(cart.into_inner());
    let item = ItemUuid::from_uuid(item.into_inner());

    let span = tracing::Span::current();

    span.record("cart_uuid", tracing::field::display(cart));
    span.record("item_uuid", tracing::field::display(item));

    let held = app
        .carts
        .item_count(cart, item)
        .await
        .map_err(into_status_error)?;

    let stocked = app
        .items
        .get_item(item)
        .await
        .map_err(|error| into_status_error(error.into()))?
        .inventory;

    // Inventory may have dropped below what the cart already holds.
    if held >= stocked {
        return Err(StatusError::conflict().brief("No more of this item is in stock."));
    }

    let line = app
        .carts
        .add_item(cart, item)
        .await
        .map_err(into_status_error)?;

    let count = app.carts.count(cart).await.map_err(into_status_error)?;

    span.record("quantity", line.quantity);

    Ok(Json(CartItemAddedResponse {
        message: added_message(&line),
        count,
        line: line.into(),
    }))
}

fn added_message(line: &CartLineSummary) -> String {
    let copies = if line.quantity == 1 { "copy" } else { "copies" };

    format!(
        "You now have {} {copies} of {} in your cart.",
        line.quantity, line.item.name
    )
}
