//! Core types: provider payloads, the unified record, persisted data

mod book;
mod raw;
mod reader;
mod unified;

pub use book::{shorten, PersistedBook, SHORT_DESCRIPTION_LEN};
pub use raw::{
    CatalogSearch, CatalogVolume, ImageLinks, RankedListItem, RankedListResponse,
    RankedListResults, RawBook, VolumeInfo,
};
pub use reader::{
    Interaction, InteractionPatch, ReadingStatus, Review, ReviewPatch, MAX_RATING, MIN_RATING,
};
pub use unified::{HomeFeed, UnifiedBook, UNKNOWN_TITLE};
