//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};

use storefront_app::domain::{
    carts::{
        MockCartsService,
        models::{Cart, CartContents, CartUuid},
    },
    items::{
        MockItemsService,
        models::{Item, ItemUuid, MerchantUuid},
    },
    orders::{
        MockOrdersService,
        models::{CustomerDetails, ItemOrder, ItemOrderUuid, Order, OrderUuid},
    },
};

use crate::state::State;

pub(crate) fn make_item(name: &str, price: u64, inventory: u32) -> Item {
    Item {
        uuid: ItemUuid::new(),
        merchant_uuid: MerchantUuid::new(),
        name: name.to_string(),
        price,
        inventory,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        deleted_at: None,
    }
}

pub(crate) fn make_cart(uuid: CartUuid) -> Cart {
    Cart {
        uuid,
        contents: CartContents::new(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn customer() -> CustomerDetails {
    CustomerDetails {
        name: "Joe".to_string(),
        address: "123 Test Drive".to_string(),
        city: "Denver".to_string(),
        state: "CO".to_string(),
        zip: "80128".to_string(),
    }
}

pub(crate) fn make_order(uuid: OrderUuid, lines: &[(&Item, u32)]) -> Order {
    Order {
        uuid,
        customer: customer(),
        items: lines
            .iter()
            .map(|&(item, quantity)| ItemOrder {
                uuid: ItemOrderUuid::new(),
                order_uuid: uuid,
                item_uuid: item.uuid,
                price: item.price,
                quantity,
                created_at: Timestamp::UNIX_EPOCH,
            })
            .collect(),
        created_at: Timestamp::UNIX_EPOCH,
    }
}

/// Serve `route` with the given mocks injected as application state.
pub(crate) fn service(
    items: MockItemsService,
    carts: MockCartsService,
    orders: MockOrdersService,
    route: Router,
) -> Service {
    let state = State::with_services(Arc::new(items), Arc::new(carts), Arc::new(orders));

    Service::new(Router::new().hoop(inject(state)).push(route))
}

pub(crate) fn carts_service(carts: MockCartsService, route: Router) -> Service {
    service(MockItemsService::new(), carts, MockOrdersService::new(), route)
}

pub(crate) fn orders_service(
    carts: MockCartsService,
    orders: MockOrdersService,
    route: Router,
) -> Service {
    service(MockItemsService::new(), carts, orders, route)
}
