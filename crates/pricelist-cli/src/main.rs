mod db;
mod parse;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::db::DbCommands;

#[derive(Debug, Parser)]
#[command(name = "pricelist-cli")]
#[command(about = "Price-list normalization command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Parse a workbook and print its catalog variants as JSON
    Parse {
        /// Path to an .xlsx or .xls price list
        file: PathBuf,
        /// Print normalized products instead of priced variants
        #[arg(long)]
        normalized: bool,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Catalog store maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = pricelist_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    // stdout carries the JSON output.
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Parse {
            file,
            normalized,
            pretty,
        }) => parse::run_parse(&config, &file, normalized, pretty).await?,
        Some(Commands::Db { command }) => {
            let pool = pricelist_db::connect_pool_from_config(&config).await?;
            match command {
                DbCommands::Ping => db::run_db_ping(&pool).await?,
                DbCommands::Migrate => db::run_db_migrate(&pool).await?,
                DbCommands::Seed => db::run_db_seed(&pool).await?,
            }
        }
        None => println!("no command given; see `pricelist-cli --help`"),
    }

    Ok(())
}
