mod commands;
mod output;

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use storefront_lib::{ApiClient, MemoryTokenStore, TokenStore};

use crate::output::OutputFormat;

/// Environment variable seeding the credential provider at startup.
const TOKEN_ENV: &str = "STOREFRONT_TOKEN";

#[derive(Parser)]
#[command(name = "storefront")]
#[command(about = "Query and manage the storefront API from the command line")]
struct Cli {
    /// Output format: table or json
    #[arg(long, default_value = "table", global = true)]
    output: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List, create, update, or delete products
    Products(commands::products::ProductsArgs),
    /// Look up user profiles (requires a token)
    Users(commands::users::UsersArgs),
    /// Show the bundled demo payments table
    Payments(commands::payments::PaymentsArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("storefront=info".parse()?),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let format = match cli.output.as_str() {
        "json" => OutputFormat::Json,
        _ => OutputFormat::Table,
    };

    let store = Arc::new(MemoryTokenStore::new());
    if let Ok(token) = std::env::var(TOKEN_ENV) {
        store.set(&token);
    }
    let client = Arc::new(ApiClient::new(store)?);

    match &cli.command {
        Commands::Products(args) => commands::products::run(args, &client, &format).await?,
        Commands::Users(args) => commands::users::run(args, &client, &format).await?,
        Commands::Payments(args) => commands::payments::run(args, &format)?,
    }

    Ok(())
}
