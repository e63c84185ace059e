//! Checkout Handler

use salvo::{
    http::header::LOCATION,
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use storefront_app::domain::{
    carts::models::CartUuid,
    orders::models::{CustomerDetails, NewOrder, OrderUuid},
};

use crate::{
    carts::errors::into_status_error as cart_status_error,
    extensions::*,
    observability::{record_checkout_rejected, record_order_created},
    orders::{
        errors::{into_status_error, rejection_reason},
        responses::OrderResponse,
    },
};

/// Checkout Request
///
/// Missing fields are treated as blank and reported by validation.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct CheckoutRequest {
    pub customer_name: String,
    pub customer_address: String,
    pub customer_city: String,
    pub customer_state: String,
    pub customer_zip: String,
}

impl From<CheckoutRequest> for CustomerDetails {
    fn from(request: CheckoutRequest) -> Self {
        CustomerDetails {
            name: request.customer_name,
            address: request.customer_address,
            city: request.customer_city,
            state: request.customer_state,
            zip: request.customer_zip,
        }
    }
}

/// Checkout Handler
///
/// Turns the cart into an order at current prices, then discards the cart.
#[endpoint(
    tags("orders"),
    summary = "Checkout Cart",
    responses(
        (status_code = StatusCode::CREATED, description = "Order created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Cart is empty"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart or item not found"),
        (status_code = StatusCode::CONFLICT, description = "Not enough inventory"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Invalid customer details"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "orders.checkout",
    skip(cart, json, depot, res),
    fields(
        cart_uuid = tracing::field::Empty,
        order_uuid = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    cart: PathParam<Uuid>,
    json: JsonBody<CheckoutRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, StatusError> {
    let app = depot.app()?;
    let cart = CartUuid::from_uuid(cart.into_inner());
    let uuid = OrderUuid::new();

    let span = tracing::Span::current();

    span.record("cart_uuid", tracing::field::display(cart));
    span.record("order_uuid", tracing::field::display(uuid));

    let contents = app.carts.get_cart(cart).await.map_err(cart_status_error)?;

    let order = NewOrder::from_cart(uuid, json.into_inner().into(), &contents);

    let created = app.orders.checkout(order).await.map_err(|error| {
        if let Some(reason) = rejection_reason(&error) {
            record_checkout_rejected(reason);
        }

        into_status_error(error)
    })?;

    record_order_created(created.items.len());

    // The order is committed; a cart that has already gone is not a failure.
    if let Err(error) = app.carts.delete_cart(cart).await {
        warn!(cart_uuid = %cart, "failed to clear cart after checkout: {error}");
    }

    info!(
        order_uuid = %created.uuid,
        line_items = created.items.len(),
        "checked out cart"
    );

    res.add_header(LOCATION, format!("/orders/{}", created.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(created.into()))
}
