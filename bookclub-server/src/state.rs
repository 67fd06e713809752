//! Application state

use anyhow::{Context, Result};
use bookclub_core::storage::{LibraryStore, LocalStorage};
use bookclub_core::{
    BookResolver, CatalogProvider, Config, FeedService, HttpCatalog, MemoryCache, OpenAiGenerator,
    ReaderService, SummaryConfig, SummaryService, TextGenerator,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

/// Server-only settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Directory holding the library snapshot
    pub storage_path: PathBuf,

    pub bind: SocketAddr,

    /// `*` or a comma-separated origin list; `None` allows localhost dev origins
    pub cors_origins: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            storage_path: PathBuf::from("./bookclub_data"),
            bind: SocketAddr::from(([127, 0, 0, 1], 3000)),
            cors_origins: None,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let storage_path = std::env::var("BOOKCLUB_STORAGE_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.storage_path);

        let bind = match std::env::var("BOOKCLUB_BIND") {
            Ok(addr) => addr
                .parse()
                .with_context(|| format!("Invalid BOOKCLUB_BIND address: {}", addr))?,
            Err(_) => defaults.bind,
        };

        Ok(Self {
            storage_path,
            bind,
            cors_origins: std::env::var("BOOKCLUB_CORS_ORIGINS").ok(),
        })
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub feed: Arc<FeedService>,
    pub resolver: Arc<BookResolver>,
    pub summaries: Arc<SummaryService>,
    pub reader: Arc<ReaderService>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Build state against the real providers and an on-disk library
    pub async fn new(config: ServerConfig) -> Result<Self> {
        let providers = Config::from_env();

        tokio::fs::create_dir_all(&config.storage_path)
            .await
            .with_context(|| format!("Cannot create {}", config.storage_path.display()))?;
        let storage = Arc::new(LocalStorage::new(&config.storage_path));
        let store = Arc::new(LibraryStore::open(storage).await?);

        let catalog = Arc::new(HttpCatalog::new(providers.catalog)?);
        let generator = Arc::new(OpenAiGenerator::new(providers.summary.clone())?);

        if providers.summary.api_key.is_none() {
            tracing::warn!("OPENAI_API_KEY not set, summaries will fall back");
        }

        Ok(Self::with_providers(
            catalog,
            generator,
            store,
            &providers.summary,
            config,
        ))
    }

    /// Wire services around the given providers and record store
    pub fn with_providers(
        catalog: Arc<dyn CatalogProvider>,
        generator: Arc<dyn TextGenerator>,
        store: Arc<LibraryStore>,
        summary: &SummaryConfig,
        config: ServerConfig,
    ) -> Self {
        let cache = Arc::new(MemoryCache::new());

        Self {
            feed: Arc::new(FeedService::new(catalog.clone())),
            resolver: Arc::new(BookResolver::new(catalog, store.clone())),
            summaries: Arc::new(SummaryService::new(
                store.clone(),
                cache,
                generator,
                summary,
            )),
            reader: Arc::new(ReaderService::new(store.clone(), store)),
            config: Arc::new(config),
        }
    }
}
