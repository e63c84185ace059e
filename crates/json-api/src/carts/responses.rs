//! Cart response bodies shared by cart handlers.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::carts::models::{CartLineSummary, CartSummary};

/// Cart Line Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartLineResponse {
    /// Item in the cart
    pub item_uuid: Uuid,

    /// Item name
    pub name: String,

    /// Current unit price in minor units
    pub price: u64,

    /// Units in stock
    pub inventory: u32,

    /// Units in the cart
    pub quantity: u32,

    /// Current price times quantity
    pub subtotal: u64,

    /// Whether the cart already holds every unit in stock
    pub at_inventory_limit: bool,
}

impl From<CartLineSummary> for CartLineResponse {
    fn from(line: CartLineSummary) -> Self {
        Self {
            item_uuid: line.item.uuid.into_uuid(),
            name: line.item.name,
            price: line.item.price,
            inventory: line.item.inventory,
            quantity: line.quantity,
            subtotal: line.subtotal,
            at_inventory_limit: line.at_inventory_limit,
        }
    }
}

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// The unique identifier of the cart
    pub uuid: Uuid,

    /// Lines priced at current item prices
    pub lines: Vec<CartLineResponse>,

    /// Total units in the cart
    pub count: u64,

    /// Sum of line subtotals
    pub grand_total: u64,
}

impl From<CartSummary> for CartResponse {
    fn from(summary: CartSummary) -> Self {
        Self {
            uuid: summary.uuid.into_uuid(),
            lines: summary
                .lines
                .into_iter()
                .map(CartLineResponse::from)
                .collect(),
            count: summary.count,
            grand_total: summary.grand_total,
        }
    }
}
