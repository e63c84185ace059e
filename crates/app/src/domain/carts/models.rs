//! Cart Models

use jiff::Timestamp;
use smallvec::SmallVec;

use crate::{
    domain::items::models::{Item, ItemUuid},
    uuids::TypedUuid,
};

/// Cart UUID
pub type CartUuid = TypedUuid<Cart>;

/// One entry in a cart: an item and how many units of it are selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartLine {
    pub item_uuid: ItemUuid,
    pub quantity: u32,
}

/// Item quantities keyed by item, in insertion order.
///
/// Items that were never added have a quantity of zero. A line reduced to
/// zero by [`CartContents::subtract`] stays present until it is removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartContents {
    lines: SmallVec<[CartLine; 8]>,
}

impl CartContents {
    /// Create empty contents.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build contents from existing lines. Repeated items are merged.
    #[must_use]
    pub fn from_lines(lines: impl IntoIterator<Item = CartLine>) -> Self {
        let mut contents = Self::new();

        for line in lines {
            let quantity = contents.entry(line.item_uuid);
            *quantity = quantity.saturating_add(line.quantity);
        }

        contents
    }

    /// Quantity of the given item, zero when absent.
    pub fn quantity(&self, item: ItemUuid) -> u32 {
        self.line(item).map_or(0, |line| line.quantity)
    }

    /// Add one unit of the item, returning the new quantity.
    pub fn add(&mut self, item: ItemUuid) -> u32 {
        let quantity = self.entry(item);
        *quantity = quantity.saturating_add(1);
        *quantity
    }

    /// Remove one unit of the item, never going below zero, returning the new
    /// quantity. Items not in the cart are left absent.
    pub fn subtract(&mut self, item: ItemUuid) -> u32 {
        let Some(line) = self.lines.iter_mut().find(|line| line.item_uuid == item) else {
            return 0;
        };

        line.quantity = line.quantity.saturating_sub(1);
        line.quantity
    }

    /// Drop the item's line. Returns `false` when the item was not present.
    pub fn remove(&mut self, item: ItemUuid) -> bool {
        let before = self.lines.len();

        self.lines.retain(|line| line.item_uuid != item);

        self.lines.len() != before
    }

    /// Total units across all lines.
    pub fn count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    fn line(&self, item: ItemUuid) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.item_uuid == item)
    }

    fn entry(&mut self, item: ItemUuid) -> &mut u32 {
        let index = match self.lines.iter().position(|line| line.item_uuid == item) {
            Some(index) => index,
            None => {
                self.lines.push(CartLine {
                    item_uuid: item,
                    quantity: 0,
                });

                self.lines.len() - 1
            }
        };

        &mut self.lines[index].quantity
    }
}

/// Cart Model
///
/// A transient, per-session selection of items. Prices are never stored on
/// the cart; every total is computed from the live [`Item`] passed in.
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    pub uuid: CartUuid,
    pub contents: CartContents,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new(uuid: CartUuid) -> Self {
        Self::with_contents(uuid, CartContents::new())
    }

    /// Create a cart carrying over contents from an earlier session.
    #[must_use]
    pub fn with_contents(uuid: CartUuid, contents: CartContents) -> Self {
        let now = Timestamp::now();

        Self {
            uuid,
            contents,
            created_at: now,
            updated_at: now,
        }
    }

    /// Add one unit of an item. Callers enforce the inventory ceiling with
    /// [`Cart::at_inventory_limit`] before calling this.
    pub fn add_item(&mut self, item: ItemUuid) -> u32 {
        self.touch();
        self.contents.add(item)
    }

    /// Remove one unit of an item, stopping at zero.
    pub fn subtract_item(&mut self, item: ItemUuid) -> u32 {
        self.touch();
        self.contents.subtract(item)
    }

    /// Drop an item from the cart entirely.
    pub fn remove_item(&mut self, item: ItemUuid) -> bool {
        self.touch();
        self.contents.remove(item)
    }

    pub fn item_count(&self, item: ItemUuid) -> u32 {
        self.contents.quantity(item)
    }

    /// Total units in the cart, for the cart-size badge.
    pub fn count(&self) -> u64 {
        self.contents.count()
    }

    /// Items present in the cart, in the order they were first added.
    pub fn item_uuids(&self) -> impl Iterator<Item = ItemUuid> + '_ {
        self.contents.lines().iter().map(|line| line.item_uuid)
    }

    /// Live subtotal: the item's current price times its quantity here.
    pub fn subtotal(&self, item: &Item) -> u64 {
        item.price
            .saturating_mul(u64::from(self.item_count(item.uuid)))
    }

    /// Whether the cart already holds every unit of the item in stock.
    pub fn at_inventory_limit(&self, item: &Item) -> bool {
        self.item_count(item.uuid) == item.inventory
    }

    pub fn clear(&mut self) {
        self.touch();
        self.contents.clear();
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}

/// New Cart Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewCart {
    pub uuid: CartUuid,
    pub contents: CartContents,
}

/// A cart line priced against the live catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLineSummary {
    pub item: Item,
    pub quantity: u32,
    pub subtotal: u64,
    pub at_inventory_limit: bool,
}

impl CartLineSummary {
    #[must_use]
    pub fn new(cart: &Cart, item: Item) -> Self {
        Self {
            quantity: cart.item_count(item.uuid),
            subtotal: cart.subtotal(&item),
            at_inventory_limit: cart.at_inventory_limit(&item),
            item,
        }
    }
}

/// A whole cart priced against the live catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct CartSummary {
    pub uuid: CartUuid,
    pub lines: Vec<CartLineSummary>,
    pub count: u64,
    pub grand_total: u64,
}

impl CartSummary {
    /// Price a cart given the live record of every item it holds.
    #[must_use]
    pub fn new(cart: &Cart, items: Vec<Item>) -> Self {
        let lines: Vec<CartLineSummary> = items
            .into_iter()
            .map(|item| CartLineSummary::new(cart, item))
            .collect();

        let grand_total = lines
            .iter()
            .fold(0_u64, |total, line| total.saturating_add(line.subtotal));

        Self {
            uuid: cart.uuid,
            count: cart.count(),
            grand_total,
            lines,
        }
    }
}
