use clap::{Args, Subcommand};

mod create;
mod delete;

#[derive(Debug, Args)]
pub(crate) struct ItemCommand {
    #[command(subcommand)]
    command: ItemSubcommand,
}

#[derive(Debug, Subcommand)]
enum ItemSubcommand {
    /// Add an item to the catalog
    Create(create::CreateItemArgs),
    /// Remove an item from the catalog
    Delete(delete::DeleteItemArgs),
}

pub(crate) async fn run(command: ItemCommand) -> Result<(), String> {
    match command.command {
        ItemSubcommand::Create(args) => create::run(args).await,
        ItemSubcommand::Delete(args) => delete::run(args).await,
    }
}
