use serde::Serialize;
use storefront_lib::dataset::PaymentRecord;
use storefront_lib::types::{PageMeta, Product, User};
use tabled::{Table, Tabled};

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Tabled, Serialize)]
struct ProductRow {
    #[tabled(rename = "Id")]
    #[serde(rename = "Id")]
    id: String,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Price")]
    #[serde(rename = "Price")]
    price: String,
    #[tabled(rename = "Category")]
    #[serde(rename = "Category")]
    category: String,
    #[tabled(rename = "Description")]
    #[serde(rename = "Description")]
    description: String,
}

#[derive(Tabled, Serialize)]
struct UserRow {
    #[tabled(rename = "Id")]
    #[serde(rename = "Id")]
    id: String,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    #[serde(rename = "Email")]
    email: String,
    #[tabled(rename = "Role")]
    #[serde(rename = "Role")]
    role: String,
}

#[derive(Tabled, Serialize)]
struct PaymentRow {
    #[tabled(rename = "Id")]
    #[serde(rename = "Id")]
    id: String,
    #[tabled(rename = "Date")]
    #[serde(rename = "Date")]
    date: String,
    #[tabled(rename = "Status")]
    #[serde(rename = "Status")]
    status: String,
    #[tabled(rename = "Email")]
    #[serde(rename = "Email")]
    email: String,
    #[tabled(rename = "Amount")]
    #[serde(rename = "Amount")]
    amount: String,
}

// -- Row builders --

fn build_product_rows(products: &[Product]) -> Vec<ProductRow> {
    products
        .iter()
        .map(|p| ProductRow {
            id: p.id.clone(),
            name: p.name.clone(),
            price: format_price(p.price),
            category: p.category.clone(),
            description: p.description.clone().unwrap_or_default(),
        })
        .collect()
}

fn build_user_rows(users: &[User]) -> Vec<UserRow> {
    users
        .iter()
        .map(|u| UserRow {
            id: u.id.clone(),
            name: u.name.clone(),
            email: u.email.clone(),
            role: u.role.clone(),
        })
        .collect()
}

fn build_payment_rows(payments: &[PaymentRecord]) -> Vec<PaymentRow> {
    payments
        .iter()
        .map(|p| PaymentRow {
            id: p.id.clone(),
            date: p
                .parsed_date()
                .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| p.date.clone()),
            status: p.status.to_string(),
            email: p.email.clone(),
            amount: format_price(p.amount as f64),
        })
        .collect()
}

// -- Table output --

pub fn print_products_table(products: &[Product]) {
    println!("{}", Table::new(build_product_rows(products)));
}

pub fn print_users_table(users: &[User]) {
    println!("{}", Table::new(build_user_rows(users)));
}

pub fn print_payments_table(payments: &[PaymentRecord]) {
    println!("{}", Table::new(build_payment_rows(payments)));
}

/// Prints a one-line paging summary under a listing table.
pub fn print_meta_line(meta: &PageMeta) {
    println!(
        "page {}/{} ({} items{})",
        meta.page,
        meta.total_pages,
        meta.total,
        if meta.has_next_page { ", more available" } else { "" }
    );
}

// -- JSON output --

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

fn format_price(value: f64) -> String {
    format!("${:.2}", value)
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod output_tests;
