//! Item Models

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Item UUID
pub type ItemUuid = TypedUuid<Item>;

/// Merchant marker; merchants are managed outside the catalog.
#[derive(Debug)]
pub struct Merchant;

/// Merchant UUID
pub type MerchantUuid = TypedUuid<Merchant>;

/// Item Model
///
/// `price` is in minor units; `inventory` is the maximum number of units that
/// may be sold (and therefore sit in one cart).
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub uuid: ItemUuid,
    pub merchant_uuid: MerchantUuid,
    pub name: String,
    pub price: u64,
    pub inventory: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// New Item Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    pub uuid: ItemUuid,
    pub merchant_uuid: MerchantUuid,
    pub name: String,
    pub price: u64,
    pub inventory: u32,
}

/// Item Update Model
#[derive(Debug, Clone, PartialEq)]
pub struct ItemUpdate {
    pub name: String,
    pub price: u64,
    pub inventory: u32,
}
