//! Order response bodies.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::orders::models::{ItemOrder, Order};

/// Item Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ItemOrderResponse {
    pub uuid: Uuid,
    pub item_uuid: Uuid,

    /// Unit price paid, in minor units
    pub price: u64,

    pub quantity: u32,

    /// Price paid times quantity
    pub subtotal: u64,
}

impl From<ItemOrder> for ItemOrderResponse {
    fn from(item_order: ItemOrder) -> Self {
        Self {
            uuid: item_order.uuid.into_uuid(),
            item_uuid: item_order.item_uuid.into_uuid(),
            price: item_order.price,
            quantity: item_order.quantity,
            subtotal: item_order.subtotal(),
        }
    }
}

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub uuid: Uuid,
    pub customer_name: String,
    pub customer_address: String,
    pub customer_city: String,
    pub customer_state: String,
    pub customer_zip: String,
    pub items: Vec<ItemOrderResponse>,

    /// Sum of line subtotals at the prices paid
    pub grand_total: u64,

    /// The date and time the order was placed
    pub created_at: String,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        let grand_total = order.grand_total();

        Self {
            uuid: order.uuid.into_uuid(),
            customer_name: order.customer.name,
            customer_address: order.customer.address,
            customer_city: order.customer.city,
            customer_state: order.customer.state,
            customer_zip: order.customer.zip,
            items: order.items.into_iter().map(ItemOrderResponse::from).collect(),
            grand_total,
            created_at: order.created_at.to_string(),
        }
    }
}
