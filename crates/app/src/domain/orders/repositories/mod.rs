//! Orders Repositories

mod item_orders;
mod orders;

pub(crate) use item_orders::{NewItemOrder, PgItemOrdersRepository};
pub(crate) use orders::PgOrdersRepository;
