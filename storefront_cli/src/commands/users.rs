//! The `users` subcommand: authenticated profile lookups.

use std::sync::Arc;

use anyhow::Result;
use clap::{Args, Subcommand};
use storefront_lib::{ApiClient, ProductCatalog};

use crate::output::{print_json, print_users_table, OutputFormat};

/// Arguments for the `users` subcommand.
#[derive(Args)]
pub struct UsersArgs {
    #[command(subcommand)]
    action: UsersAction,
}

#[derive(Subcommand)]
enum UsersAction {
    /// Show a user's profile by id
    Show { id: String },
}

pub async fn run(args: &UsersArgs, client: &Arc<ApiClient>, format: &OutputFormat) -> Result<()> {
    let catalog = ProductCatalog::new(Arc::clone(client));

    match &args.action {
        UsersAction::Show { id } => {
            let status = catalog.user_profile(id).await?;
            if let Some(envelope) = status.into_envelope() {
                match format {
                    OutputFormat::Json => print_json(&envelope),
                    OutputFormat::Table => print_users_table(std::slice::from_ref(&envelope.data)),
                }
            }
        }
    }

    Ok(())
}
