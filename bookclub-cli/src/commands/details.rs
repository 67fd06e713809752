//! Details command implementation

use super::{catalog, print_json};
use anyhow::Result;
use bookclub_core::normalize::normalize_catalog;
use bookclub_core::types::{shorten, SHORT_DESCRIPTION_LEN};
use bookclub_core::CatalogProvider;

/// Display one catalog book without storing it
pub async fn details(external_id: &str, json: bool) -> Result<()> {
    let catalog = catalog()?;

    let Some(volume) = catalog.details(external_id).await else {
        anyhow::bail!("Book not found: {}", external_id);
    };
    let book = normalize_catalog(volume);

    if json {
        return print_json(&book);
    }

    println!("Title:       {}", book.title);
    if !book.authors.is_empty() {
        println!("Authors:     {}", book.authors.join(", "));
    }
    if let Some(date) = &book.published_date {
        println!("Published:   {}", date);
    }
    if !book.categories.is_empty() {
        println!("Categories:  {}", book.categories.join(", "));
    }
    if let Some(rating) = book.average_rating {
        println!("Rating:      {:.1}", rating);
    }
    if let Some(desc) = &book.description {
        println!("Description: {}", shorten(desc, SHORT_DESCRIPTION_LEN));
    }
    Ok(())
}
