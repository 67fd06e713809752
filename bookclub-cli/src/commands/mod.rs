//! CLI command implementations

mod details;
mod feeds;
mod search;

pub use details::details;
pub use feeds::{bestsellers, home};
pub use search::search;

use anyhow::{Context, Result};
use bookclub_core::{CatalogConfig, HttpCatalog, UnifiedBook};
use std::sync::Arc;

/// Catalog client configured from the environment
fn catalog() -> Result<Arc<HttpCatalog>> {
    let client =
        HttpCatalog::new(CatalogConfig::from_env()).context("Failed to create catalog client")?;
    Ok(Arc::new(client))
}

/// One line per book: position, title, authors and id
fn print_books(books: &[UnifiedBook]) {
    if books.is_empty() {
        println!("No books found.");
        return;
    }

    for (i, book) in books.iter().enumerate() {
        let position = match book.rank {
            Some(rank) => format!("#{}", rank),
            None => format!("{}.", i + 1),
        };
        let mut line = format!("{:>4} {}", position, book.title);
        if !book.authors.is_empty() {
            line.push_str(&format!(" by {}", book.authors.join(", ")));
        }
        if let Some(id) = &book.external_id {
            line.push_str(&format!(" [{}]", id));
        }
        println!("{}", line);
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
