//! Test Helpers

use crate::{
    domain::{
        carts::models::CartLine,
        items::{
            ItemsService, ItemsServiceError,
            models::{Item, ItemUuid, MerchantUuid, NewItem},
        },
        orders::{
            OrdersService, OrdersServiceError,
            models::{CustomerDetails, NewOrder, Order, OrderUuid},
        },
    },
    test::TestContext,
};

pub(crate) fn customer() -> CustomerDetails {
    CustomerDetails {
        name: "Sal".to_string(),
        address: "123 Main St".to_string(),
        city: "Denver".to_string(),
        state: "CO".to_string(),
        zip: "80202".to_string(),
    }
}

pub(crate) async fn create_item(
    ctx: &TestContext,
    name: &str,
    price: u64,
    inventory: u32,
) -> Result<Item, ItemsServiceError> {
    ctx.items
        .create_item(NewItem {
            uuid: ItemUuid::new(),
            merchant_uuid: MerchantUuid::new(),
            name: name.to_string(),
            price,
            inventory,
        })
        .await
}

pub(crate) async fn checkout(
    ctx: &TestContext,
    lines: &[(ItemUuid, u32)],
) -> Result<Order, OrdersServiceError> {
    ctx.orders
        .checkout(NewOrder {
            uuid: OrderUuid::new(),
            customer: customer(),
            lines: lines
                .iter()
                .map(|&(item_uuid, quantity)| CartLine {
                    item_uuid,
                    quantity,
                })
                .collect(),
        })
        .await
}
