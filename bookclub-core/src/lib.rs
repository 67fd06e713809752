//! Bookclub Core Library
//!
//! Book search, materialization and summaries for the Bookclub reading
//! service. External catalog payloads are normalized into one
//! [`UnifiedBook`] shape; books a user opens are materialized once into the
//! local store; generated summaries are cached with a time-to-live.

pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod feed;
pub mod memo;
pub mod normalize;
pub mod reader;
pub mod resolve;
pub mod storage;
pub mod summary;
pub mod types;

pub use cache::{EphemeralCache, MemoryCache};
pub use catalog::{CatalogProvider, HttpCatalog};
pub use config::{CatalogConfig, Config, SummaryConfig};
pub use error::{BookclubError, CatalogError, GenerationError, Result, StorageError};
pub use feed::FeedService;
pub use normalize::normalize;
pub use reader::{LibraryEntry, NewInteraction, NewReview, ReaderService};
pub use resolve::BookResolver;
pub use summary::{OpenAiGenerator, SummaryService, TextGenerator};
pub use types::{
    HomeFeed, Interaction, InteractionPatch, PersistedBook, RawBook, ReadingStatus, Review,
    ReviewPatch, UnifiedBook,
};
