use clap::Args;
use storefront_app::{
    database::{self, Db},
    domain::items::{
        ItemsService, PgItemsService,
        models::{ItemUuid, MerchantUuid, NewItem},
    },
};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct CreateItemArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Merchant selling the item
    #[arg(long)]
    merchant_uuid: Uuid,

    /// Item display name
    #[arg(long)]
    name: String,

    /// Unit price in minor currency units
    #[arg(long)]
    price: u64,

    /// Units in stock
    #[arg(long)]
    inventory: u32,

    /// Optional item UUID; generated when omitted
    #[arg(long)]
    uuid: Option<Uuid>,
}

pub(crate) async fn run(args: CreateItemArgs) -> Result<(), String> {
    if args.name.trim().is_empty() {
        return Err("name cannot be empty".to_string());
    }

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgItemsService::new(Db::new(pool));

    let item = service
        .create_item(NewItem {
            uuid: args.uuid.map_or_else(ItemUuid::new, ItemUuid::from_uuid),
            merchant_uuid: MerchantUuid::from_uuid(args.merchant_uuid),
            name: args.name,
            price: args.price,
            inventory: args.inventory,
        })
        .await
        .map_err(|error| format!("failed to create item: {error}"))?;

    println!("item_uuid: {}", item.uuid);
    println!("item_name: {}", item.name);

    Ok(())
}
