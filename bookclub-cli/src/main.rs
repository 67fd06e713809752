//! Bookclub CLI - Command-line interface for book discovery

mod commands;

use anyhow::Result;
use bookclub_core::catalog::DEFAULT_RANKED_LIST;
use bookclub_core::feed::HOME_FEED_LIMIT;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Parse a result count (must be at least 1)
fn parse_count(s: &str) -> Result<usize, String> {
    let n: usize = s.parse().map_err(|_| format!("'{}' is not a valid number", s))?;
    if n < 1 {
        Err("count must be at least 1".to_string())
    } else {
        Ok(n)
    }
}

#[derive(Parser)]
#[command(name = "bookclub")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the book catalog
    Search {
        /// Free-text query
        query: String,

        /// Maximum number of results
        #[arg(short, long, default_value = "20", value_parser = parse_count)]
        max: usize,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the home page feeds
    Home {
        /// Books per feed
        #[arg(short, long, default_value_t = HOME_FEED_LIMIT, value_parser = parse_count)]
        limit: usize,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a bestseller list
    Bestsellers {
        /// Ranked list name
        #[arg(long, default_value = DEFAULT_RANKED_LIST)]
        list: String,

        /// Number of entries
        #[arg(short, long, default_value_t = HOME_FEED_LIMIT, value_parser = parse_count)]
        limit: usize,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Display catalog details of one book
    Details {
        /// Catalog identifier
        external_id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Logs go to stderr so JSON output stays clean
    let filter = if cli.verbose {
        "bookclub_cli=debug,bookclub_core=debug"
    } else {
        "bookclub_cli=info,bookclub_core=warn"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Search { query, max, json } => commands::search(&query, max, json).await,

        Commands::Home { limit, json } => commands::home(limit, json).await,

        Commands::Bestsellers { list, limit, json } => {
            commands::bestsellers(&list, limit, json).await
        }

        Commands::Details { external_id, json } => commands::details(&external_id, json).await,
    }
}
