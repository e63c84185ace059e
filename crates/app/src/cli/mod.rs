use clap::{Parser, Subcommand};

mod db;
mod item;

#[derive(Debug, Parser)]
#[command(name = "storefront-app", about = "Storefront operator CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Db(db::DbCommand),
    Item(item::ItemCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Db(command) => db::run(command).await,
            Commands::Item(command) => item::run(command).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_item_create() {
        let cli = Cli::try_parse_from([
            "storefront-app",
            "item",
            "create",
            "--database-url",
            "postgres://localhost/storefront",
            "--merchant-uuid",
            "0190c9f4-7c1e-7000-8000-000000000001",
            "--name",
            "Chain",
            "--price",
            "5000",
            "--inventory",
            "5",
        ]);

        assert!(cli.is_ok(), "expected item create to parse: {cli:?}");
    }

    #[test]
    fn rejects_negative_price() {
        let cli = Cli::try_parse_from([
            "storefront-app",
            "item",
            "create",
            "--database-url",
            "postgres://localhost/storefront",
            "--merchant-uuid",
            "0190c9f4-7c1e-7000-8000-000000000001",
            "--name",
            "Chain",
            "--price",
            "-1",
            "--inventory",
            "5",
        ]);

        assert!(cli.is_err());
    }
}
