//! Order Models

use jiff::Timestamp;

use crate::{
    domain::{
        carts::models::{Cart, CartLine},
        items::models::ItemUuid,
    },
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<Order>;

/// Item Order UUID
pub type ItemOrderUuid = TypedUuid<ItemOrder>;

/// Shipping details collected at checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerDetails {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

/// Order Model
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub uuid: OrderUuid,
    pub customer: CustomerDetails,
    pub items: Vec<ItemOrder>,
    pub created_at: Timestamp,
}

impl Order {
    /// Total of the order's line items at the prices paid.
    pub fn grand_total(&self) -> u64 {
        self.items
            .iter()
            .fold(0_u64, |total, item| total.saturating_add(item.subtotal()))
    }
}

/// Item Order Model
///
/// A line of a completed order. `price` is the item's price when the order
/// was placed and is never re-read from the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemOrder {
    pub uuid: ItemOrderUuid,
    pub order_uuid: OrderUuid,
    pub item_uuid: ItemUuid,
    pub price: u64,
    pub quantity: u32,
    pub created_at: Timestamp,
}

impl ItemOrder {
    pub fn subtotal(&self) -> u64 {
        self.price.saturating_mul(u64::from(self.quantity))
    }
}

/// New Order Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub uuid: OrderUuid,
    pub customer: CustomerDetails,
    pub lines: Vec<CartLine>,
}

impl NewOrder {
    /// Prepare an order from a cart's current contents. Lines with no units
    /// are left out.
    #[must_use]
    pub fn from_cart(uuid: OrderUuid, customer: CustomerDetails, cart: &Cart) -> Self {
        Self {
            uuid,
            customer,
            lines: cart
                .contents
                .lines()
                .iter()
                .copied()
                .filter(|line| line.quantity > 0)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::carts::models::CartUuid;

    use super::*;

    fn make_item_order(order_uuid: OrderUuid, price: u64, quantity: u32) -> ItemOrder {
        ItemOrder {
            uuid: ItemOrderUuid::new(),
            order_uuid,
            item_uuid: ItemUuid::new(),
            price,
            quantity,
            created_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn item_order_subtotal_is_price_times_quantity() {
        let item_order = make_item_order(OrderUuid::new(), 50_00, 1);

        assert_eq!(item_order.subtotal(), 50_00);

        let item_order = make_item_order(OrderUuid::new(), 12_50, 3);

        assert_eq!(item_order.subtotal(), 37_50);
    }

    #[test]
    fn grand_total_sums_line_subtotals() {
        let uuid = OrderUuid::new();

        let order = Order {
            uuid,
            customer: CustomerDetails::default(),
            items: vec![
                make_item_order(uuid, 50_00, 2),
                make_item_order(uuid, 12_50, 1),
            ],
            created_at: Timestamp::UNIX_EPOCH,
        };

        assert_eq!(order.grand_total(), 112_50);
    }

    #[test]
    fn empty_order_totals_zero() {
        let order = Order {
            uuid: OrderUuid::new(),
            customer: CustomerDetails::default(),
            items: vec![],
            created_at: Timestamp::UNIX_EPOCH,
        };

        assert_eq!(order.grand_total(), 0);
    }

    #[test]
    fn from_cart_keeps_positive_lines_in_cart_order() {
        let chain = ItemUuid::new();
        let bell = ItemUuid::new();
        let tire = ItemUuid::new();
        let mut cart = Cart::new(CartUuid::new());

        cart.add_item(chain);
        cart.add_item(bell);
        cart.subtract_item(bell);
        cart.add_item(tire);
        cart.add_item(tire);

        let order = NewOrder::from_cart(OrderUuid::new(), CustomerDetails::default(), &cart);

        assert_eq!(
            order.lines,
            vec![
                CartLine {
                    item_uuid: chain,
                    quantity: 1,
                },
                CartLine {
                    item_uuid: tire,
                    quantity: 2,
                },
            ]
        );
    }
}
