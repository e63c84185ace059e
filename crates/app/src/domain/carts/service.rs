//! Carts service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use mockall::automock;
use rustc_hash::FxHashMap;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::{
    carts::{
        errors::CartsServiceError,
        models::{Cart, CartLineSummary, CartSummary, CartUuid, NewCart},
    },
    items::{
        ItemsService,
        models::{Item, ItemUuid},
    },
};

/// Carts untouched for this long are discarded.
pub const DEFAULT_IDLE_TIMEOUT: SignedDuration = SignedDuration::from_hours(24);

/// Session-scoped carts held in process memory.
///
/// Each session owns exactly one cart, so the lock only guards the map; it
/// is never held across a catalog lookup. A cart whose `updated_at` is older
/// than the idle timeout is treated as gone and is swept out whenever a new
/// cart is created.
#[derive(Clone)]
pub struct SessionCartsService {
    sessions: Arc<RwLock<FxHashMap<CartUuid, Cart>>>,
    items: Arc<dyn ItemsService>,
    idle_timeout: SignedDuration,
}

impl SessionCartsService {
    #[must_use]
    pub fn new(items: Arc<dyn ItemsService>) -> Self {
        Self::with_idle_timeout(items, DEFAULT_IDLE_TIMEOUT)
    }

    #[must_use]
    pub fn with_idle_timeout(items: Arc<dyn ItemsService>, idle_timeout: SignedDuration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(FxHashMap::default())),
            items,
            idle_timeout,
        }
    }

    /// Drop every cart idle as of `now`, returning how many were dropped.
    pub async fn evict_idle(&self, now: Timestamp) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();

        sessions.retain(|_, cart| !self.is_idle(cart, now));

        let evicted = before - sessions.len();

        if evicted > 0 {
            debug!(evicted, remaining = sessions.len(), "evicted idle carts");
        }

        evicted
    }

    fn is_idle(&self, cart: &Cart, now: Timestamp) -> bool {
        now.duration_since(cart.updated_at) > self.idle_timeout
    }

    async fn snapshot(&self, cart: CartUuid) -> Result<Cart, CartsServiceError> {
        let now = Timestamp::now();

        self.sessions
            .read()
            .await
            .get(&cart)
            .filter(|stored| !self.is_idle(stored, now))
            .cloned()
            .ok_or(CartsServiceError::NotFound)
    }

    async fn ensure_exists(&self, cart: CartUuid) -> Result<(), CartsServiceError> {
        self.snapshot(cart).await.map(|_cart| ())
    }

    /// Apply a mutation to a stored cart and return the cart as it now is.
    async fn update<T>(
        &self,
        cart: CartUuid,
        mutate: impl FnOnce(&mut Cart) -> T + Send,
    ) -> Result<(Cart, T), CartsServiceError> {
        let mut sessions = self.sessions.write().await;

        if sessions
            .get(&cart)
            .is_some_and(|stored| self.is_idle(stored, Timestamp::now()))
        {
            sessions.remove(&cart);
        }

        let stored = sessions
            .get_mut(&cart)
            .ok_or(CartsServiceError::NotFound)?;

        let outcome = mutate(stored);

        Ok((stored.clone(), outcome))
    }

    async fn lookup_items(&self, cart: &Cart) -> Result<Vec<Item>, CartsServiceError> {
        let mut items = Vec::with_capacity(cart.contents.lines().len());

        for uuid in cart.item_uuids() {
            items.push(self.items.get_item(uuid).await?);
        }

        Ok(items)
    }
}

#[async_trait]
impl CartsService for SessionCartsService {
    async fn create_cart(&self, cart: NewCart) -> Result<Cart, CartsServiceError> {
        self.evict_idle(Timestamp::now()).await;

        let mut sessions = self.sessions.write().await;

        if sessions.contains_key(&cart.uuid) {
            return Err(CartsServiceError::AlreadyExists);
        }

        let created = Cart::with_contents(cart.uuid, cart.contents);

        sessions.insert(created.uuid, created.clone());

        debug!(cart_uuid = %created.uuid, "created cart");

        Ok(created)
    }

    async fn get_cart(&self, cart: CartUuid) -> Result<Cart, CartsServiceError> {
        self.snapshot(cart).await
    }

    async fn delete_cart(&self, cart: CartUuid) -> Result<(), CartsServiceError> {
        let now = Timestamp::now();

        self.sessions
            .write()
            .await
            .remove(&cart)
            .filter(|removed| !self.is_idle(removed, now))
            .map(|_removed| ())
            .ok_or(CartsServiceError::NotFound)
    }

    async fn add_item(
        &self,
        cart: CartUuid,
        item: ItemUuid,
    ) -> Result<CartLineSummary, CartsServiceError> {
        self.ensure_exists(cart).await?;

        let item = self.items.get_item(item).await?;
        let uuid = item.uuid;

        let (cart, quantity) = self.update(cart, |cart| cart.add_item(uuid)).await?;

        debug!(cart_uuid = %cart.uuid, item_uuid = %uuid, quantity, "added item to cart");

        Ok(CartLineSummary::new(&cart, item))
    }

    async fn subtract_item(
        &self,
        cart: CartUuid,
        item: ItemUuid,
    ) -> Result<CartLineSummary, CartsServiceError> {
        self.ensure_exists(cart).await?;

        let item = self.items.get_item(item).await?;
        let uuid = item.uuid;

        let (cart, quantity) = self
            .update(cart, |cart| cart.subtract_item(uuid))
            .await?;

        debug!(cart_uuid = %cart.uuid, item_uuid = %uuid, quantity, "subtracted item from cart");

        Ok(CartLineSummary::new(&cart, item))
    }

    async fn remove_item(&self, cart: CartUuid, item: ItemUuid) -> Result<(), CartsServiceError> {
        let (_cart, removed) = self.update(cart, |cart| cart.remove_item(item)).await?;

        if !removed {
            return Err(CartsServiceError::ItemNotFound);
        }

        Ok(())
    }

    async fn item_count(&self, cart: CartUuid, item: ItemUuid) -> Result<u32, CartsServiceError> {
        Ok(self.snapshot(cart).await?.item_count(item))
    }

    async fn subtotal(&self, cart: CartUuid, item: ItemUuid) -> Result<u64, CartsServiceError> {
        let cart = self.snapshot(cart).await?;
        let item = self.items.get_item(item).await?;

        Ok(cart.subtotal(&item))
    }

    async fn grand_total(&self, cart: CartUuid) -> Result<u64, CartsServiceError> {
        Ok(self.summarize(cart).await?.grand_total)
    }

    async fn count(&self, cart: CartUuid) -> Result<u64, CartsServiceError> {
        Ok(self.snapshot(cart).await?.count())
    }

    async fn inventory_limit(
        &self,
        cart: CartUuid,
        item: ItemUuid,
    ) -> Result<bool, CartsServiceError> {
        let cart = self.snapshot(cart).await?;
        let item = self.items.get_item(item).await?;

        Ok(cart.at_inventory_limit(&item))
    }

    async fn contents(&self, cart: CartUuid) -> Result<Vec<Item>, CartsServiceError> {
        let cart = self.snapshot(cart).await?;

        self.lookup_items(&cart).await
    }

    async fn summarize(&self, cart: CartUuid) -> Result<CartSummary, CartsServiceError> {
        let cart = self.snapshot(cart).await?;
        let items = self.lookup_items(&cart).await?;

        Ok(CartSummary::new(&cart, items))
    }
}

/// Per-session shopping carts priced against the live catalog.
#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Starts a cart for a new session, optionally with carried-over contents.
    async fn create_cart(&self, cart: NewCart) -> Result<Cart, CartsServiceError>;

    /// Retrieve a single cart.
    async fn get_cart(&self, cart: CartUuid) -> Result<Cart, CartsServiceError>;

    /// Clears and discards a cart. Callers invoke this after a successful
    /// checkout.
    async fn delete_cart(&self, cart: CartUuid) -> Result<(), CartsServiceError>;

    /// Adds one unit of an item. The inventory ceiling is not enforced here;
    /// callers compare [`CartsService::item_count`] with the item's inventory.
    async fn add_item(
        &self,
        cart: CartUuid,
        item: ItemUuid,
    ) -> Result<CartLineSummary, CartsServiceError>;

    /// Removes one unit of an item, stopping at zero.
    async fn subtract_item(
        &self,
        cart: CartUuid,
        item: ItemUuid,
    ) -> Result<CartLineSummary, CartsServiceError>;

    /// Drops an item's line from the cart.
    async fn remove_item(&self, cart: CartUuid, item: ItemUuid) -> Result<(), CartsServiceError>;

    /// Units of an item in the cart, zero when absent.
    async fn item_count(&self, cart: CartUuid, item: ItemUuid) -> Result<u32, CartsServiceError>;

    /// Live price of an item times its quantity in the cart.
    async fn subtotal(&self, cart: CartUuid, item: ItemUuid) -> Result<u64, CartsServiceError>;

    /// Sum of live subtotals over every item in the cart.
    async fn grand_total(&self, cart: CartUuid) -> Result<u64, CartsServiceError>;

    /// Total units in the cart.
    async fn count(&self, cart: CartUuid) -> Result<u64, CartsServiceError>;

    /// Whether the cart already holds the item's full inventory.
    async fn inventory_limit(
        &self,
        cart: CartUuid,
        item: ItemUuid,
    ) -> Result<bool, CartsServiceError>;

    /// Live catalog records for every item in the cart, in cart order.
    async fn contents(&self, cart: CartUuid) -> Result<Vec<Item>, CartsServiceError>;

    /// Prices every line of the cart in one pass.
    async fn summarize(&self, cart: CartUuid) -> Result<CartSummary, CartsServiceError>;
}
