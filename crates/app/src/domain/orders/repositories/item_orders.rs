//! Item Orders Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};

use crate::{
    database::{encode_amount, try_get_amount, try_get_count},
    domain::{
        items::models::ItemUuid,
        orders::models::{ItemOrder, ItemOrderUuid, OrderUuid},
    },
};

const CREATE_ITEM_ORDER_SQL: &str = include_str!("../sql/create_item_order.sql");
const GET_ITEM_ORDERS_SQL: &str = include_str!("../sql/get_item_orders.sql");
const ITEM_HAS_ORDERS_SQL: &str = include_str!("../sql/item_has_orders.sql");

#[derive(Debug, Clone)]
pub(crate) struct NewItemOrder {
    pub uuid: ItemOrderUuid,
    pub order_uuid: OrderUuid,
    pub item_uuid: ItemUuid,
    pub price: u64,
    pub quantity: u32,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgItemOrdersRepository;

impl PgItemOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_item_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item_order: NewItemOrder,
    ) -> Result<ItemOrder, sqlx::Error> {
        query_as::<Postgres, ItemOrder>(CREATE_ITEM_ORDER_SQL)
            .bind(item_order.uuid.into_uuid())
            .bind(item_order.order_uuid.into_uuid())
            .bind(item_order.item_uuid.into_uuid())
            .bind(encode_amount(item_order.price, "price")?)
            .bind(i64::from(item_order.quantity))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_item_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Vec<ItemOrder>, sqlx::Error> {
        query_as::<Postgres, ItemOrder>(GET_ITEM_ORDERS_SQL)
            .bind(order.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Whether any order line references the item.
    pub(crate) async fn item_has_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: ItemUuid,
    ) -> Result<bool, sqlx::Error> {
        query_scalar::<Postgres, bool>(ITEM_HAS_ORDERS_SQL)
            .bind(item.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for ItemOrder {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ItemOrderUuid::from_uuid(row.try_get("uuid")?),
            order_uuid: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            item_uuid: ItemUuid::from_uuid(row.try_get("item_uuid")?),
            price: try_get_amount(row, "price")?,
            quantity: try_get_count(row, "quantity")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
