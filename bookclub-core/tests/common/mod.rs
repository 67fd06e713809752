//! Test doubles for the external providers

#![allow(dead_code)]

use async_trait::async_trait;
use bookclub_core::catalog::CatalogProvider;
use bookclub_core::error::GenerationError;
use bookclub_core::summary::TextGenerator;
use bookclub_core::types::{CatalogVolume, ImageLinks, RankedListItem, VolumeInfo};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Barrier;

/// Build a catalog volume with a title and one author
pub fn volume(id: &str, title: &str) -> CatalogVolume {
    CatalogVolume {
        id: Some(id.to_string()),
        volume_info: Some(VolumeInfo {
            title: Some(title.to_string()),
            authors: vec![format!("Author of {}", title)],
            image_links: Some(ImageLinks {
                small_thumbnail: None,
                thumbnail: Some(format!("http://covers/{}.jpg", id)),
            }),
            ..Default::default()
        }),
    }
}

/// Build a ranked-list entry
pub fn ranked(rank: u32) -> RankedListItem {
    RankedListItem {
        title: Some(format!("Bestseller {}", rank)),
        author: Some(format!("Writer {}", rank)),
        rank: Some(rank),
        list_name: Some("Hardcover Fiction".to_string()),
        ..Default::default()
    }
}

/// Scripted catalog provider that counts its calls
#[derive(Default)]
pub struct FakeCatalog {
    searches: HashMap<String, Vec<CatalogVolume>>,
    details: HashMap<String, CatalogVolume>,
    ranked: Vec<RankedListItem>,
    detail_gate: Option<Arc<Barrier>>,
    pub search_calls: AtomicUsize,
    pub detail_calls: AtomicUsize,
    pub ranked_calls: AtomicUsize,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, query: &str, results: Vec<CatalogVolume>) -> Self {
        self.searches.insert(query.to_string(), results);
        self
    }

    pub fn with_details(mut self, id: &str, volume: CatalogVolume) -> Self {
        self.details.insert(id.to_string(), volume);
        self
    }

    pub fn with_ranked(mut self, items: Vec<RankedListItem>) -> Self {
        self.ranked = items;
        self
    }

    /// Make every detail lookup wait until `parties` lookups are in flight
    pub fn with_detail_gate(mut self, parties: usize) -> Self {
        self.detail_gate = Some(Arc::new(Barrier::new(parties)));
        self
    }

    pub fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogProvider for FakeCatalog {
    async fn search(&self, query: &str, max_results: u32) -> Vec<CatalogVolume> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        self.searches
            .get(query)
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .take(max_results as usize)
            .collect()
    }

    async fn details(&self, external_id: &str) -> Option<CatalogVolume> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.detail_gate {
            gate.wait().await;
        }
        self.details.get(external_id).cloned()
    }

    async fn ranked_list(&self, _list_name: &str, limit: usize) -> Vec<RankedListItem> {
        self.ranked_calls.fetch_add(1, Ordering::SeqCst);
        self.ranked.iter().take(limit).cloned().collect()
    }
}

/// Text generator replaying scripted outcomes
#[derive(Default)]
pub struct FakeGenerator {
    script: Mutex<VecDeque<Result<String, GenerationError>>>,
    prompts: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl FakeGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then_ok(self, text: &str) -> Self {
        self.script.lock().unwrap().push_back(Ok(text.to_string()));
        self
    }

    pub fn then_err(self, error: GenerationError) -> Self {
        self.script.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for FakeGenerator {
    async fn generate(&self, prompt: &str, _max_tokens: u32) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GenerationError::Api("script exhausted".to_string())))
    }
}
