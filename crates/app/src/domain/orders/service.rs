//! Orders service.

use async_trait::async_trait;
use mockall::automock;
use tracing::{debug, info};

use crate::{
    database::Db,
    domain::{
        items::{models::ItemUuid, repository::PgItemsRepository},
        orders::{
            errors::OrdersServiceError,
            models::{ItemOrderUuid, NewOrder, Order, OrderUuid},
            repositories::{NewItemOrder, PgItemOrdersRepository, PgOrdersRepository},
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    orders: PgOrdersRepository,
    item_orders: PgItemOrdersRepository,
    items: PgItemsRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            orders: PgOrdersRepository::new(),
            item_orders: PgItemOrdersRepository::new(),
            items: PgItemsRepository::new(),
        }
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn checkout(&self, order: NewOrder) -> Result<Order, OrdersServiceError> {
        order.customer.validate()?;

        if order.lines.iter().all(|line| line.quantity == 0) {
            return Err(OrdersServiceError::EmptyCart);
        }

        let mut tx = self.db.begin_transaction().await?;

        let mut created = self
            .orders
            .create_order(&mut tx, order.uuid, &order.customer)
            .await?;

        for line in order.lines.iter().filter(|line| line.quantity > 0) {
            let item = match self.items.lock_item(&mut tx, line.item_uuid).await {
                Ok(item) => item,
                Err(sqlx::Error::RowNotFound) => {
                    return Err(OrdersServiceError::ItemNotFound(line.item_uuid));
                }
                Err(error) => return Err(error.into()),
            };

            if line.quantity > item.inventory {
                debug!(
                    item_uuid = %item.uuid,
                    requested = line.quantity,
                    available = item.inventory,
                    "rejecting checkout line over inventory"
                );

                return Err(OrdersServiceError::InsufficientInventory {
                    item: item.uuid,
                    requested: line.quantity,
                    available: item.inventory,
                });
            }

            let item_order = self
                .item_orders
                .create_item_order(
                    &mut tx,
                    NewItemOrder {
                        uuid: ItemOrderUuid::new(),
                        order_uuid: created.uuid,
                        item_uuid: item.uuid,
                        price: item.price,
                        quantity: line.quantity,
                    },
                )
                .await?;

            created.items.push(item_order);
        }

        tx.commit().await?;

        info!(
            order_uuid = %created.uuid,
            line_items = created.items.len(),
            grand_total = created.grand_total(),
            "created order"
        );

        Ok(created)
    }

    async fn get_order(&self, order: OrderUuid) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let mut found = self.orders.get_order(&mut tx, order).await?;

        found.items = self.item_orders.get_item_orders(&mut tx, order).await?;

        tx.commit().await?;

        Ok(found)
    }

    async fn item_has_orders(&self, item: ItemUuid) -> Result<bool, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let has_orders = self.item_orders.item_has_orders(&mut tx, item).await?;

        tx.commit().await?;

        Ok(has_orders)
    }
}

/// Turns carts into persisted orders.
#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Validate the customer details and persist the order with one line per
    /// cart item, snapshotting each item's current price.
    ///
    /// Nothing is written unless every line is accepted.
    async fn checkout(&self, order: NewOrder) -> Result<Order, OrdersServiceError>;

    /// Retrieve an order with its line items.
    async fn get_order(&self, order: OrderUuid) -> Result<Order, OrdersServiceError>;

    /// Whether any order line references the item.
    async fn item_has_orders(&self, item: ItemUuid) -> Result<bool, OrdersServiceError>;
}

#[cfg(test)]
mod tests {
    use sqlx::PgPool;
    use testresult::TestResult;

    use crate::{
        domain::{
            carts::{
                CartsService,
                models::{CartContents, CartLine, CartUuid, NewCart},
            },
            items::{ItemsService, models::ItemUpdate},
            orders::{models::CustomerDetails, validation::CustomerField},
        },
        test::{TestContext, helpers},
    };

    use super::*;

    /// A service whose pool never connects. Only usable for paths that fail
    /// before touching storage.
    fn offline_service() -> Result<PgOrdersService, sqlx::Error> {
        let pool = PgPool::connect_lazy("postgres://storefront@localhost:1/storefront")?;

        Ok(PgOrdersService::new(Db::new(pool)))
    }

    fn line(item_uuid: ItemUuid, quantity: u32) -> CartLine {
        CartLine {
            item_uuid,
            quantity,
        }
    }

    #[tokio::test]
    async fn checkout_with_invalid_details_reports_every_failure() -> TestResult {
        let service = offline_service()?;

        let result = service
            .checkout(NewOrder {
                uuid: OrderUuid::new(),
                customer: CustomerDetails {
                    zip: String::new(),
                    ..helpers::customer()
                },
                lines: vec![line(ItemUuid::new(), 1)],
            })
            .await;

        let Err(OrdersServiceError::Validation(errors)) = &result else {
            panic!("expected Validation, got {result:?}");
        };

        assert_eq!(errors.errors().len(), 3);
        assert!(
            errors
                .errors()
                .iter()
                .all(|error| error.field == CustomerField::Zip)
        );

        Ok(())
    }

    #[tokio::test]
    async fn checkout_without_lines_returns_empty_cart() -> TestResult {
        let service = offline_service()?;

        let result = service
            .checkout(NewOrder {
                uuid: OrderUuid::new(),
                customer: helpers::customer(),
                lines: vec![],
            })
            .await;

        assert!(
            matches!(result, Err(OrdersServiceError::EmptyCart)),
            "expected EmptyCart, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn checkout_with_only_zero_quantity_lines_returns_empty_cart() -> TestResult {
        let service = offline_service()?;

        let result = service
            .checkout(NewOrder {
                uuid: OrderUuid::new(),
                customer: helpers::customer(),
                lines: vec![line(ItemUuid::new(), 0)],
            })
            .await;

        assert!(
            matches!(result, Err(OrdersServiceError::EmptyCart)),
            "expected EmptyCart, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn checkout_creates_one_line_per_item_at_current_price() -> TestResult {
        let ctx = TestContext::new().await;
        let chain = helpers::create_item(&ctx, "Chain", 50_00, 5).await?;
        let tire = helpers::create_item(&ctx, "Tire", 12_50, 10).await?;

        let order = helpers::checkout(&ctx, &[(chain.uuid, 2), (tire.uuid, 1)]).await?;

        assert_eq!(order.items.len(), 2);
        assert_eq!(order.items[0].item_uuid, chain.uuid);
        assert_eq!(order.items[0].price, 50_00);
        assert_eq!(order.items[0].quantity, 2);
        assert_eq!(order.items[1].item_uuid, tire.uuid);
        assert_eq!(order.items[1].quantity, 1);
        assert_eq!(order.grand_total(), 112_50);
        assert!(order.items.iter().all(|line| line.order_uuid == order.uuid));

        let fetched = ctx.orders.get_order(order.uuid).await?;

        assert_eq!(fetched, order);

        Ok(())
    }

    #[tokio::test]
    async fn order_price_is_unaffected_by_later_price_changes() -> TestResult {
        let ctx = TestContext::new().await;
        let chain = helpers::create_item(&ctx, "Chain", 50_00, 5).await?;

        let order = helpers::checkout(&ctx, &[(chain.uuid, 1)]).await?;

        ctx.items
            .update_item(
                chain.uuid,
                ItemUpdate {
                    name: chain.name.clone(),
                    price: 80_00,
                    inventory: chain.inventory,
                },
            )
            .await?;

        let fetched = ctx.orders.get_order(order.uuid).await?;

        assert_eq!(fetched.items[0].price, 50_00);
        assert_eq!(fetched.grand_total(), 50_00);

        Ok(())
    }

    #[tokio::test]
    async fn checkout_does_not_decrement_inventory() -> TestResult {
        let ctx = TestContext::new().await;
        let chain = helpers::create_item(&ctx, "Chain", 50_00, 5).await?;

        helpers::checkout(&ctx, &[(chain.uuid, 5)]).await?;

        let after = ctx.items.get_item(chain.uuid).await?;

        assert_eq!(after.inventory, 5);

        Ok(())
    }

    #[tokio::test]
    async fn checkout_skips_zero_quantity_lines() -> TestResult {
        let ctx = TestContext::new().await;
        let chain = helpers::create_item(&ctx, "Chain", 50_00, 5).await?;
        let bell = helpers::create_item(&ctx, "Bell", 5_00, 5).await?;

        let order = helpers::checkout(&ctx, &[(chain.uuid, 1), (bell.uuid, 0)]).await?;

        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].item_uuid, chain.uuid);
        assert!(!ctx.orders.item_has_orders(bell.uuid).await?);

        Ok(())
    }

    #[tokio::test]
    async fn checkout_over_inventory_writes_nothing() -> TestResult {
        let ctx = TestContext::new().await;
        let chain = helpers::create_item(&ctx, "Chain", 50_00, 5).await?;
        let tire = helpers::create_item(&ctx, "Tire", 12_50, 1).await?;
        let uuid = OrderUuid::new();

        let result = ctx
            .orders
            .checkout(NewOrder {
                uuid,
                customer: helpers::customer(),
                lines: vec![line(chain.uuid, 1), line(tire.uuid, 2)],
            })
            .await;

        assert!(
            matches!(
                result,
                Err(OrdersServiceError::InsufficientInventory {
                    item,
                    requested: 2,
                    available: 1,
                }) if item == tire.uuid
            ),
            "expected InsufficientInventory, got {result:?}"
        );

        let lookup = ctx.orders.get_order(uuid).await;

        assert!(
            matches!(lookup, Err(OrdersServiceError::NotFound)),
            "expected no order to be persisted, got {lookup:?}"
        );
        assert!(!ctx.orders.item_has_orders(chain.uuid).await?);

        Ok(())
    }

    #[tokio::test]
    async fn checkout_with_unknown_item_writes_nothing() -> TestResult {
        let ctx = TestContext::new().await;
        let chain = helpers::create_item(&ctx, "Chain", 50_00, 5).await?;
        let missing = ItemUuid::new();
        let uuid = OrderUuid::new();

        let result = ctx
            .orders
            .checkout(NewOrder {
                uuid,
                customer: helpers::customer(),
                lines: vec![line(chain.uuid, 1), line(missing, 1)],
            })
            .await;

        assert!(
            matches!(result, Err(OrdersServiceError::ItemNotFound(item)) if item == missing),
            "expected ItemNotFound, got {result:?}"
        );

        let lookup = ctx.orders.get_order(uuid).await;

        assert!(
            matches!(lookup, Err(OrdersServiceError::NotFound)),
            "expected no order to be persisted, got {lookup:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn get_order_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.orders.get_order(OrderUuid::new()).await;

        assert!(
            matches!(result, Err(OrdersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn checkout_of_a_session_cart_matches_its_live_totals() -> TestResult {
        let ctx = TestContext::new().await;
        let chain = helpers::create_item(&ctx, "Chain", 50_00, 5).await?;
        let tire = helpers::create_item(&ctx, "Tire", 12_50, 10).await?;
        let cart = CartUuid::new();

        ctx.carts
            .create_cart(NewCart {
                uuid: cart,
                contents: CartContents::new(),
            })
            .await?;

        ctx.carts.add_item(cart, chain.uuid).await?;
        ctx.carts.add_item(cart, chain.uuid).await?;
        ctx.carts.add_item(cart, tire.uuid).await?;
        ctx.carts.subtract_item(cart, tire.uuid).await?;

        let live_total = ctx.carts.grand_total(cart).await?;
        let contents = ctx.carts.get_cart(cart).await?;

        let order = ctx
            .orders
            .checkout(NewOrder::from_cart(
                OrderUuid::new(),
                helpers::customer(),
                &contents,
            ))
            .await?;

        ctx.carts.delete_cart(cart).await?;

        assert_eq!(live_total, 100_00);
        assert_eq!(order.grand_total(), live_total);
        assert_eq!(order.items.len(), 1, "zeroed tire line is not ordered");
        assert_eq!(order.items[0].item_uuid, chain.uuid);
        assert_eq!(order.items[0].quantity, 2);

        Ok(())
    }
}
