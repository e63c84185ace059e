//! Items service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        items::{
            errors::ItemsServiceError,
            models::{Item, ItemUpdate, ItemUuid, NewItem},
            repository::PgItemsRepository,
        },
        orders::repositories::PgItemOrdersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgItemsService {
    db: Db,
    repository: PgItemsRepository,
    item_orders: PgItemOrdersRepository,
}

impl PgItemsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgItemsRepository::new(),
            item_orders: PgItemOrdersRepository::new(),
        }
    }
}

#[async_trait]
impl ItemsService for PgItemsService {
    async fn list_items(&self) -> Result<Vec<Item>, ItemsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let items = self.repository.list_items(&mut tx).await?;

        tx.commit().await?;

        Ok(items)
    }

    async fn get_item(&self, item: ItemUuid) -> Result<Item, ItemsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let item = self.repository.get_item(&mut tx, item).await?;

        tx.commit().await?;

        Ok(item)
    }

    async fn create_item(&self, item: NewItem) -> Result<Item, ItemsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let created = self.repository.create_item(&mut tx, item).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_item(
        &self,
        item: ItemUuid,
        update: ItemUpdate,
    ) -> Result<Item, ItemsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let updated = self.repository.update_item(&mut tx, item, update).await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_item(&self, item: ItemUuid) -> Result<(), ItemsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        // Checkout holds the same row lock while it writes order lines.
        self.repository.lock_item(&mut tx, item).await?;

        if self.item_orders.item_has_orders(&mut tx, item).await? {
            return Err(ItemsServiceError::HasOrders);
        }

        let rows_affected = self.repository.delete_item(&mut tx, item).await?;

        if rows_affected == 0 {
            return Err(ItemsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

/// Catalog of sellable items.
#[automock]
#[async_trait]
pub trait ItemsService: Send + Sync {
    /// Retrieves all items that have not been deleted.
    async fn list_items(&self) -> Result<Vec<Item>, ItemsServiceError>;

    /// Retrieve a single item with its live price and inventory.
    async fn get_item(&self, item: ItemUuid) -> Result<Item, ItemsServiceError>;

    /// Creates a new item.
    async fn create_item(&self, item: NewItem) -> Result<Item, ItemsServiceError>;

    /// Replaces an item's name, price and inventory.
    async fn update_item(
        &self,
        item: ItemUuid,
        update: ItemUpdate,
    ) -> Result<Item, ItemsServiceError>;

    /// Deletes an item. Items referenced by any order line cannot be deleted.
    async fn delete_item(&self, item: ItemUuid) -> Result<(), ItemsServiceError>;
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use testresult::TestResult;
    use uuid::Uuid;

    use crate::{
        domain::{
            items::models::{ItemUpdate, MerchantUuid, NewItem},
            orders::OrdersService,
        },
        test::{TestContext, helpers},
    };

    use super::*;

    #[tokio::test]
    async fn create_item_returns_item_with_price_and_inventory() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = ItemUuid::new();
        let merchant_uuid = MerchantUuid::new();

        let item = ctx
            .items
            .create_item(NewItem {
                uuid,
                merchant_uuid,
                name: "Chain".to_string(),
                price: 50_00,
                inventory: 5,
            })
            .await?;

        assert_eq!(item.uuid, uuid);
        assert_eq!(item.merchant_uuid, merchant_uuid);
        assert_eq!(item.name, "Chain");
        assert_eq!(item.price, 50_00);
        assert_eq!(item.inventory, 5);
        assert!(item.deleted_at.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn get_item_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.items.get_item(ItemUuid::new()).await;

        assert!(
            matches!(result, Err(ItemsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn create_item_duplicate_uuid_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;
        let item = helpers::create_item(&ctx, "Chain", 50_00, 5).await?;

        let result = ctx
            .items
            .create_item(NewItem {
                uuid: item.uuid,
                merchant_uuid: MerchantUuid::new(),
                name: "Tire".to_string(),
                price: 10_00,
                inventory: 1,
            })
            .await;

        assert!(
            matches!(result, Err(ItemsServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_item_with_blank_name_returns_invalid_data() {
        let ctx = TestContext::new().await;

        let result = ctx
            .items
            .create_item(NewItem {
                uuid: ItemUuid::new(),
                merchant_uuid: MerchantUuid::new(),
                name: String::new(),
                price: 10_00,
                inventory: 1,
            })
            .await;

        assert!(
            matches!(result, Err(ItemsServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );
    }

    #[tokio::test]
    async fn update_item_reflects_new_price() -> TestResult {
        let ctx = TestContext::new().await;
        let item = helpers::create_item(&ctx, "Chain", 50_00, 5).await?;

        let updated = ctx
            .items
            .update_item(
                item.uuid,
                ItemUpdate {
                    name: item.name.clone(),
                    price: 65_00,
                    inventory: 3,
                },
            )
            .await?;

        assert_eq!(updated.price, 65_00);
        assert_eq!(updated.inventory, 3);

        Ok(())
    }

    #[tokio::test]
    async fn delete_item_makes_it_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let item = helpers::create_item(&ctx, "Chain", 50_00, 5).await?;

        ctx.items.delete_item(item.uuid).await?;

        let result = ctx.items.get_item(item.uuid).await;

        assert!(
            matches!(result, Err(ItemsServiceError::NotFound)),
            "expected NotFound after deletion, got {result:?}"
        );

        let listed = ctx.items.list_items().await?;

        assert!(
            !listed.iter().any(|listed| listed.uuid == item.uuid),
            "deleted item should not appear in list"
        );

        let deleted_at_set: bool =
            sqlx::query_scalar("SELECT deleted_at IS NOT NULL FROM items WHERE uuid = $1")
                .bind(item.uuid.into_uuid())
                .fetch_one(ctx.db.pool())
                .await?;

        assert!(deleted_at_set, "deleted items are kept with a deletion time");

        Ok(())
    }

    #[tokio::test]
    async fn delete_item_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.items.delete_item(ItemUuid::new()).await;

        assert!(
            matches!(result, Err(ItemsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn ordered_item_cannot_be_deleted() -> TestResult {
        let ctx = TestContext::new().await;
        let item = helpers::create_item(&ctx, "Chain", 50_00, 5).await?;

        helpers::checkout(&ctx, &[(item.uuid, 1)]).await?;

        assert!(ctx.orders.item_has_orders(item.uuid).await?);

        let result = ctx.items.delete_item(item.uuid).await;

        assert!(
            matches!(result, Err(ItemsServiceError::HasOrders)),
            "expected HasOrders, got {result:?}"
        );

        let still_there = ctx.items.get_item(item.uuid).await?;

        assert_eq!(still_there.uuid, item.uuid);

        Ok(())
    }

    #[tokio::test]
    async fn delete_waits_for_an_in_flight_checkout_and_refuses() -> TestResult {
        let ctx = TestContext::new().await;
        let item = helpers::create_item(&ctx, "Chain", 50_00, 5).await?;
        let order = Uuid::now_v7();

        // Same row lock and inserts a checkout makes, left uncommitted.
        let mut checkout = ctx.db.pool().begin().await?;

        sqlx::query("SELECT uuid FROM items WHERE uuid = $1 FOR UPDATE")
            .bind(item.uuid.into_uuid())
            .execute(&mut *checkout)
            .await?;

        sqlx::query(
            "INSERT INTO orders \
             (uuid, customer_name, customer_address, customer_city, customer_state, customer_zip) \
             VALUES ($1, 'Sal', '123 Main St', 'Denver', 'CO', '80202')",
        )
        .bind(order)
        .execute(&mut *checkout)
        .await?;

        sqlx::query(
            "INSERT INTO item_orders (uuid, order_uuid, item_uuid, price, quantity) \
             VALUES ($1, $2, $3, 5000, 1)",
        )
        .bind(Uuid::now_v7())
        .bind(order)
        .bind(item.uuid.into_uuid())
        .execute(&mut *checkout)
        .await?;

        let items = ctx.items.clone();
        let uuid = item.uuid;
        let delete = tokio::spawn(async move { items.delete_item(uuid).await });

        tokio::time::sleep(Duration::from_millis(250)).await;

        assert!(
            !delete.is_finished(),
            "delete must block on the item row held by checkout"
        );

        checkout.commit().await?;

        let result = delete.await?;

        assert!(
            matches!(result, Err(ItemsServiceError::HasOrders)),
            "expected HasOrders, got {result:?}"
        );

        let still_there = ctx.items.get_item(item.uuid).await?;

        assert_eq!(still_there.uuid, item.uuid);

        Ok(())
    }
}
