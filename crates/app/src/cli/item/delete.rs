use clap::Args;
use storefront_app::{
    database::{self, Db},
    domain::items::{ItemsService, PgItemsService, models::ItemUuid},
};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct DeleteItemArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Item to delete
    #[arg(long)]
    uuid: Uuid,
}

pub(crate) async fn run(args: DeleteItemArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgItemsService::new(Db::new(pool));

    service
        .delete_item(ItemUuid::from_uuid(args.uuid))
        .await
        .map_err(|error| format!("failed to delete item: {error}"))?;

    println!("deleted item: {}", args.uuid);

    Ok(())
}
