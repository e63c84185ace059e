//! Create Cart Handler

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::carts::models::{CartContents, CartLine, NewCart};

use crate::{carts::errors::into_status_error, extensions::*};

/// Create Cart Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateCartRequest {
    /// Session cart UUID chosen by the caller
    pub uuid: Uuid,

    /// Contents carried over from an earlier session
    #[serde(default)]
    pub items: Vec<CartLineRequest>,
}

/// Cart Line Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartLineRequest {
    pub item_uuid: Uuid,
    pub quantity: u32,
}

impl From<CreateCartRequest> for NewCart {
    fn from(request: CreateCartRequest) -> Self {
        NewCart {
            uuid: request.uuid.into(),
            contents: CartContents::from_lines(request.items.into_iter().map(|line| CartLine {
                item_uuid: line.item_uuid.into(),
                quantity: line.quantity,
            })),
        }
    }
}

/// Cart Created Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartCreatedResponse {
    /// Created cart UUID
    pub uuid: Uuid,
}

/// Create Cart Handler
#[endpoint(
    tags("carts"),
    summary = "Create Cart",
    responses(
        (status_code = StatusCode::CREATED, description = "Cart created"),
        (status_code = StatusCode::CONFLICT, description = "Cart already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "carts.create",
    skip(json, depot, res),
    fields(cart_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CreateCartRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CartCreatedResponse>, StatusError> {
    let app = depot.app()?;
    let request = json.into_inner();

    tracing::Span::current().record("cart_uuid", tracing::field::display(request.uuid));

    let uuid = app
        .carts
        .create_cart(request.into())
        .await
        .map_err(into_status_error)?
        .uuid;

    res.add_header(LOCATION, format!("/carts/{uuid}"), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(CartCreatedResponse {
        uuid: uuid.into_uuid(),
    }))
}
