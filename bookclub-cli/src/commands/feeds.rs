//! Home feed and bestseller commands

use super::{catalog, print_books, print_json};
use anyhow::Result;
use bookclub_core::FeedService;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Print the carousel, recent and bestseller feeds
pub async fn home(limit: usize, json: bool) -> Result<()> {
    let feed = FeedService::new(catalog()?);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    spinner.set_message("Fetching feeds...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let home = feed.home_feed(limit).await;
    spinner.finish_and_clear();

    if json {
        return print_json(&home);
    }

    for (heading, books) in [
        ("Carousel", &home.carousel),
        ("Recent", &home.recent),
        ("Bestsellers", &home.bestsellers),
    ] {
        println!("{}", heading);
        print_books(books);
        println!();
    }
    Ok(())
}

/// Print one ranked list in rank order
pub async fn bestsellers(list: &str, limit: usize, json: bool) -> Result<()> {
    let feed = FeedService::new(catalog()?).with_ranked_list(list);

    let books = feed.bestsellers(limit).await;

    if json {
        print_json(&books)
    } else {
        print_books(&books);
        Ok(())
    }
}
