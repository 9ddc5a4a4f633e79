//! CLI subcommand implementations.

pub mod payments;
pub mod products;
pub mod users;
