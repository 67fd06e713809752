//! Generated book summaries
//!
//! Summaries are a soft feature: [`SummaryService::get_summary`] always
//! returns text. Provider failures yield a fixed fallback that is never
//! cached, so an outage heals on the next request.

use crate::cache::EphemeralCache;
use crate::config::SummaryConfig;
use crate::error::GenerationError;
use crate::memo::{memoized, Fetched, Memoized};
use crate::storage::BookStore;
use crate::types::PersistedBook;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};
use uuid::Uuid;

/// Returned when the book is unknown
pub const SUMMARY_NOT_FOUND: &str = "Summary not available.";

/// Returned when the generator fails
pub const SUMMARY_UNAVAILABLE: &str = "Summary not available due to API error.";

/// Placeholder for books without authors
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";

/// Cache key of a book's summary
pub fn cache_key(book_id: Uuid) -> String {
    format!("book_summary_{}", book_id)
}

/// The prompt sent to the generator
pub fn summary_prompt(book: &PersistedBook) -> String {
    let authors = if book.authors.is_empty() {
        UNKNOWN_AUTHOR.to_string()
    } else {
        book.authors.join(", ")
    };
    format!(
        "Write a spoiler-free, concise summary for the book titled '{}' by {}.",
        book.title, authors
    )
}

/// A generative text provider
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Complete a single user prompt, producing at most `max_tokens` tokens
    async fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String, GenerationError>;
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Client for an OpenAI-compatible chat completion API
#[derive(Clone)]
pub struct OpenAiGenerator {
    http: reqwest::Client,
    config: SummaryConfig,
}

impl OpenAiGenerator {
    pub fn new(config: SummaryConfig) -> Result<Self, GenerationError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GenerationError::Network(e.to_string()))?;
        Ok(Self { http, config })
    }
}

#[async_trait]
impl TextGenerator for OpenAiGenerator {
    async fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String, GenerationError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| GenerationError::Config("OPENAI_API_KEY not set".into()))?;

        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens,
        };

        let start = std::time::Instant::now();
        let response = self
            .http
            .post(format!(
                "{}/chat/completions",
                self.config.api_url.trim_end_matches('/')
            ))
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| GenerationError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(GenerationError::Api(format!("{}: {}", status, error_text)));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::Parse(e.to_string()))?;

        debug!(
            model = %self.config.model,
            duration_ms = start.elapsed().as_millis(),
            "Chat completion"
        );

        chat.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| GenerationError::Api("No completion returned".into()))
    }
}

/// Cached summary generation
pub struct SummaryService {
    books: Arc<dyn BookStore>,
    cache: Arc<dyn EphemeralCache>,
    generator: Arc<dyn TextGenerator>,
    max_tokens: u32,
    ttl: Duration,
}

impl SummaryService {
    pub fn new(
        books: Arc<dyn BookStore>,
        cache: Arc<dyn EphemeralCache>,
        generator: Arc<dyn TextGenerator>,
        config: &SummaryConfig,
    ) -> Self {
        Self {
            books,
            cache,
            generator,
            max_tokens: config.max_tokens,
            ttl: config.cache_ttl,
        }
    }

    /// Summary text for a book; a fallback string when none can be produced
    pub async fn get_summary(&self, book_id: Uuid) -> String {
        match memoized(self, &book_id).await {
            Ok(summary) => summary.unwrap_or_else(|| SUMMARY_NOT_FOUND.to_string()),
            Err(never) => match never {},
        }
    }
}

#[async_trait]
impl Memoized for SummaryService {
    type Key = Uuid;
    type Value = String;
    type Error = Infallible;

    async fn lookup(&self, book_id: &Uuid) -> Result<Option<String>, Infallible> {
        let hit = self.cache.get(&cache_key(*book_id)).await;
        if hit.is_some() {
            debug!(%book_id, "Summary cache hit");
        }
        Ok(hit)
    }

    async fn fetch(&self, book_id: &Uuid) -> Result<Fetched<String>, Infallible> {
        let book = match self.books.get(*book_id).await {
            Ok(Some(book)) => book,
            Ok(None) => return Ok(Fetched::Transient(SUMMARY_NOT_FOUND.to_string())),
            Err(e) => {
                error!(%book_id, error = %e, "Failed to load book for summary");
                return Ok(Fetched::Transient(SUMMARY_NOT_FOUND.to_string()));
            }
        };

        let prompt = summary_prompt(&book);
        Ok(match self.generator.generate(&prompt, self.max_tokens).await {
            Ok(text) if !text.trim().is_empty() => Fetched::Fresh(text.trim().to_string()),
            Ok(_) => {
                warn!(%book_id, "Summary generator returned empty text");
                Fetched::Transient(SUMMARY_UNAVAILABLE.to_string())
            }
            Err(e) => {
                warn!(%book_id, error = %e, "Summary generation failed");
                Fetched::Transient(SUMMARY_UNAVAILABLE.to_string())
            }
        })
    }

    async fn store(&self, book_id: &Uuid, summary: String) -> Result<String, Infallible> {
        self.cache
            .set(&cache_key(*book_id), summary.clone(), self.ttl)
            .await;

        if let Err(e) = self.books.set_ai_summary(*book_id, &summary).await {
            warn!(%book_id, error = %e, "Failed to record summary on book");
        }
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::VolumeInfo;
    use mockito::{Matcher, Server};

    fn generator_for(server: &Server, key: Option<&str>) -> OpenAiGenerator {
        OpenAiGenerator::new(SummaryConfig {
            api_url: server.url(),
            api_key: key.map(str::to_string),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_prompt_joins_authors() {
        let mut book = PersistedBook::from_volume(
            "x",
            &VolumeInfo {
                title: Some("Good Omens".to_string()),
                authors: vec!["Terry Pratchett".to_string(), "Neil Gaiman".to_string()],
                ..Default::default()
            },
        );
        assert_eq!(
            summary_prompt(&book),
            "Write a spoiler-free, concise summary for the book titled 'Good Omens' by Terry Pratchett, Neil Gaiman."
        );

        book.authors.clear();
        assert!(summary_prompt(&book).ends_with("by Unknown Author."));
    }

    #[tokio::test]
    async fn test_openai_generator_success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer sk-test")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "model": "gpt-3.5-turbo",
                "max_tokens": 200,
                "messages": [{"role": "user", "content": "hello"}]
            })))
            .with_status(200)
            .with_body(r#"{"choices": [{"message": {"role": "assistant", "content": "  Hi there. "}}]}"#)
            .create_async()
            .await;

        let generator = generator_for(&server, Some("sk-test"));
        let text = generator.generate("hello", 200).await.unwrap();

        mock.assert_async().await;
        assert_eq!(text, "  Hi there. ");
    }

    #[tokio::test]
    async fn test_openai_generator_quota_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(429)
            .with_body(r#"{"error": {"message": "quota"}}"#)
            .create_async()
            .await;

        let generator = generator_for(&server, Some("sk-test"));
        assert!(matches!(
            generator.generate("hello", 200).await,
            Err(GenerationError::Api(_))
        ));
    }

    #[tokio::test]
    async fn test_openai_generator_without_choices() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices": []}"#)
            .create_async()
            .await;

        let generator = generator_for(&server, Some("sk-test"));
        assert!(generator.generate("hello", 200).await.is_err());
    }

    #[tokio::test]
    async fn test_openai_generator_requires_key() {
        let generator = OpenAiGenerator::new(SummaryConfig::default()).unwrap();
        assert!(matches!(
            generator.generate("hello", 200).await,
            Err(GenerationError::Config(_))
        ));
    }
}
