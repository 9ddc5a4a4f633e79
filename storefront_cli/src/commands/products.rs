//! The `products` subcommand: list, create, update, and delete products.

use std::sync::Arc;

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use storefront_lib::types::{NewProduct, ProductUpdate};
use storefront_lib::{ApiClient, ProductCatalog, QueryStatus};

use crate::output::{print_json, print_meta_line, print_products_table, OutputFormat};

/// Arguments for the `products` subcommand.
#[derive(Args)]
pub struct ProductsArgs {
    #[command(subcommand)]
    action: ProductsAction,
}

#[derive(Subcommand)]
enum ProductsAction {
    /// List products, optionally filtered by search text
    List {
        /// Free-text search; requests are only issued from two characters up
        #[arg(long)]
        search: Option<String>,
        /// Page number (1-indexed)
        #[arg(long, default_value_t = 1)]
        page: i64,
        /// Results per page
        #[arg(long, default_value_t = 10)]
        limit: i64,
    },
    /// Show one product by id
    Show { id: String },
    /// Create a product
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: f64,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        category: String,
    },
    /// Update a product (requires a token)
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        price: Option<f64>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        category: Option<String>,
    },
    /// Delete a product (requires a token; optimistic with rollback)
    Delete { id: String },
}

pub async fn run(args: &ProductsArgs, client: &Arc<ApiClient>, format: &OutputFormat) -> Result<()> {
    let catalog = ProductCatalog::new(Arc::clone(client));

    match &args.action {
        ProductsAction::List { search, page, limit } => {
            let status = match search {
                Some(search) => catalog.search_products(search, *page, *limit).await?,
                None => catalog.list_products().await?,
            };
            match status {
                QueryStatus::Disabled => {
                    bail!("search text must be at least two characters")
                }
                QueryStatus::Cached(envelope) | QueryStatus::Fetched(envelope) => match format {
                    OutputFormat::Json => print_json(&envelope),
                    OutputFormat::Table => {
                        print_products_table(&envelope.data);
                        if let Some(meta) = &envelope.meta {
                            print_meta_line(meta);
                        }
                    }
                },
            }
        }
        ProductsAction::Show { id } => {
            let status = catalog.product_detail(Some(id.as_str())).await?;
            if let Some(envelope) = status.into_envelope() {
                match format {
                    OutputFormat::Json => print_json(&envelope),
                    OutputFormat::Table => print_products_table(std::slice::from_ref(&envelope.data)),
                }
            }
        }
        ProductsAction::Create {
            name,
            price,
            description,
            category,
        } => {
            let envelope = catalog
                .create_product(&NewProduct {
                    name: name.clone(),
                    price: *price,
                    description: description.clone(),
                    category: category.clone(),
                })
                .await?;
            match format {
                OutputFormat::Json => print_json(&envelope),
                OutputFormat::Table => {
                    print_products_table(std::slice::from_ref(&envelope.data));
                    if let Some(message) = &envelope.message {
                        println!("{}", message);
                    }
                }
            }
        }
        ProductsAction::Update {
            id,
            name,
            price,
            description,
            category,
        } => {
            if name.is_none() && price.is_none() && description.is_none() && category.is_none() {
                bail!("nothing to update; pass at least one field flag");
            }
            let envelope = catalog
                .update_product(&ProductUpdate {
                    id: id.clone(),
                    name: name.clone(),
                    price: *price,
                    description: description.clone(),
                    category: category.clone(),
                })
                .await?;
            match format {
                OutputFormat::Json => print_json(&envelope),
                OutputFormat::Table => print_products_table(std::slice::from_ref(&envelope.data)),
            }
        }
        ProductsAction::Delete { id } => {
            let envelope = catalog.delete_product(id).await?;
            match format {
                OutputFormat::Json => print_json(&envelope),
                OutputFormat::Table => {
                    if envelope.data.success {
                        println!("deleted product {}", id);
                    } else {
                        println!("server declined to delete product {}", id);
                    }
                }
            }
        }
    }

    Ok(())
}
