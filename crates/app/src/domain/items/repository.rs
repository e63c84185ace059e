//! Items Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    database::{encode_amount, try_get_amount, try_get_count},
    domain::items::models::{Item, ItemUpdate, ItemUuid, MerchantUuid, NewItem},
};

const LIST_ITEMS_SQL: &str = include_str!("sql/list_items.sql");
const GET_ITEM_SQL: &str = include_str!("sql/get_item.sql");
const LOCK_ITEM_SQL: &str = include_str!("sql/lock_item.sql");
const CREATE_ITEM_SQL: &str = include_str!("sql/create_item.sql");
const UPDATE_ITEM_SQL: &str = include_str!("sql/update_item.sql");
const DELETE_ITEM_SQL: &str = include_str!("sql/delete_item.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgItemsRepository;

impl PgItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<Item>, sqlx::Error> {
        query_as::<Postgres, Item>(LIST_ITEMS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: ItemUuid,
    ) -> Result<Item, sqlx::Error> {
        query_as::<Postgres, Item>(GET_ITEM_SQL)
            .bind(item.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Read an item and hold a row lock on it until the transaction ends.
    pub(crate) async fn lock_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: ItemUuid,
    ) -> Result<Item, sqlx::Error> {
        query_as::<Postgres, Item>(LOCK_ITEM_SQL)
            .bind(item.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: NewItem,
    ) -> Result<Item, sqlx::Error> {
        query_as::<Postgres, Item>(CREATE_ITEM_SQL)
            .bind(item.uuid.into_uuid())
            .bind(item.merchant_uuid.into_uuid())
            .bind(item.name)
            .bind(encode_amount(item.price, "price")?)
            .bind(i64::from(item.inventory))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: ItemUuid,
        update: ItemUpdate,
    ) -> Result<Item, sqlx::Error> {
        query_as::<Postgres, Item>(UPDATE_ITEM_SQL)
            .bind(item.into_uuid())
            .bind(update.name)
            .bind(encode_amount(update.price, "price")?)
            .bind(i64::from(update.inventory))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: ItemUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_ITEM_SQL)
            .bind(item.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for Item {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ItemUuid::from_uuid(row.try_get("uuid")?),
            merchant_uuid: MerchantUuid::from_uuid(row.try_get("merchant_uuid")?),
            name: row.try_get("name")?,
            price: try_get_amount(row, "price")?,
            inventory: try_get_count(row, "inventory")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            deleted_at: row
                .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
