use clap::{Parser, Subcommand};
use mcontrol_db::storage::mongodb::MongoDBStorage;

use crate::commands::{HashPasswordParams, ImportStateParams};

mod commands;

#[derive(Parser)]
#[command(name = "mcontrolctl")]
pub struct Args {
    #[clap(subcommand)]
    command: Command,

    #[clap(
        short = 'D',
        long,
        global = true,
        env = "MONGODB_URI",
        default_value = "mongodb://localhost:27017/machine-control"
    )]
    db_url: String,
}

#[derive(Clone, Subcommand)]
pub enum Command {
    /// Print a bcrypt hash to use as ADMIN_PASSWORD_HASH
    #[command(name = "hash-password")]
    HashPassword(HashPasswordParams),

    /// Print the current state document, seeding it if the store is empty
    #[command(name = "show-state")]
    ShowState,

    /// Apply a JSON state document from a file, like PUT /api/state
    #[command(name = "import-state")]
    ImportState(ImportStateParams),
}

async fn connect(db_url: &str) -> anyhow::Result<MongoDBStorage> {
    MongoDBStorage::new(db_url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to MongoDB: {e}"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    match args.command {
        Command::HashPassword(params) => {
            println!("{}", commands::hash_password(params)?);
        }
        Command::ShowState => {
            let stg = connect(&args.db_url).await?;
            println!("{}", commands::show_state(&stg).await?);
        }
        Command::ImportState(params) => {
            let stg = connect(&args.db_url).await?;
            commands::import_state(&stg, params).await?;
            println!("State imported");
        }
    }

    Ok(())
}
