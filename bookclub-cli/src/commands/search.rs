//! Search command implementation

use super::{catalog, print_books, print_json};
use anyhow::Result;
use bookclub_core::FeedService;

/// Search the catalog and print normalized results
pub async fn search(query: &str, max: usize, json: bool) -> Result<()> {
    let feed = FeedService::new(catalog()?);
    let max = u32::try_from(max).unwrap_or(u32::MAX);

    let books = feed.search(query, Some(max)).await;
    tracing::debug!(query, results = books.len(), "Search finished");

    if json {
        print_json(&books)
    } else {
        print_books(&books);
        Ok(())
    }
}
