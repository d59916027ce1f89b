//! Question resolution
//!
//! Turns a free-text question into an [`Answer`] in three strictly sequential
//! stages: search for the best title, fetch its extract and thumbnail, then
//! normalize. Each stage only runs if the previous one produced a usable
//! result. Any failure collapses into a fallback answer; there is no partial
//! success.

mod answer;

pub use answer::*;

use crate::config::Settings;
use crate::network::{Fetcher, UpstreamError, UpstreamRequest, UpstreamResponse};
use crate::wiki::{ContentRecord, MediaWiki};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Resolves questions against a MediaWiki upstream.
///
/// Holds no per-call state; one instance can serve concurrent requests.
#[derive(Clone)]
pub struct Resolver {
    fetcher: Arc<dyn Fetcher>,
    wiki: MediaWiki,
    call_timeout: Duration,
    extract_budget: Option<usize>,
}

impl Resolver {
    /// Create a resolver with the default timeout and extract budget
    pub fn new(fetcher: Arc<dyn Fetcher>, wiki: MediaWiki) -> Self {
        Self {
            fetcher,
            wiki,
            call_timeout: Duration::from_secs(crate::DEFAULT_TIMEOUT),
            extract_budget: Some(DEFAULT_EXTRACT_BUDGET),
        }
    }

    /// Create a resolver configured from settings
    ///
    /// A timeout that is not a usable duration falls back to the default.
    pub fn with_settings(fetcher: Arc<dyn Fetcher>, settings: &Settings) -> Self {
        let call_timeout = Duration::try_from_secs_f64(settings.outgoing.request_timeout)
            .unwrap_or(Duration::from_secs(crate::DEFAULT_TIMEOUT));
        Self::new(fetcher, MediaWiki::with_settings(&settings.wikipedia))
            .with_timeout(call_timeout)
            .with_extract_budget(settings.wikipedia.extract_budget)
    }

    /// Set the per-call time bound (capped at `MAX_TIMEOUT`)
    pub fn with_timeout(mut self, call_timeout: Duration) -> Self {
        self.call_timeout = call_timeout.min(Duration::from_secs(crate::MAX_TIMEOUT));
        self
    }

    /// Set the answer length budget in characters, `None` to disable
    pub fn with_extract_budget(mut self, budget: Option<usize>) -> Self {
        self.extract_budget = budget;
        self
    }

    /// Resolve a question. Never fails: errors become fallback answers.
    pub async fn resolve(&self, question: &Question) -> Answer {
        self.try_resolve(question)
            .await
            .unwrap_or_else(Answer::from)
    }

    /// Resolve a question, reporting why it could not be answered
    pub async fn try_resolve(&self, question: &Question) -> Result<Answer, ResolveError> {
        let start = Instant::now();

        let result = self.run_stages(question).await;
        let elapsed = start.elapsed();

        match &result {
            Ok(answer) => info!(
                "Resolved '{}' to '{}' in {:?}",
                question, answer.title, elapsed
            ),
            Err(ResolveError::NotFound) => {
                info!("No article found for '{}' ({:?})", question, elapsed)
            }
            Err(ResolveError::Upstream(e)) => {
                warn!("Failed to resolve '{}': {} ({:?})", question, e, elapsed)
            }
        }

        result
    }

    async fn run_stages(&self, question: &Question) -> Result<Answer, ResolveError> {
        let title = self
            .search_best_title(question)
            .await?
            .ok_or(ResolveError::NotFound)?;

        let content = self.fetch_content(&title).await?;

        Ok(self.normalize(title, content))
    }

    /// Search stage: title of the upstream's top hit
    pub async fn search_best_title(
        &self,
        question: &Question,
    ) -> Result<Option<String>, UpstreamError> {
        let request = self.wiki.search_request(question.as_str());
        let response = self.call(request).await?;
        let title = self.wiki.parse_search(response)?;

        debug!("Search for '{}' matched {:?}", question, title);
        Ok(title)
    }

    /// Content stage: extract and thumbnail for an exact title
    pub async fn fetch_content(&self, title: &str) -> Result<ContentRecord, UpstreamError> {
        let request = self.wiki.content_request(title);
        let response = self.call(request).await?;
        let content = self.wiki.parse_content(response)?;

        debug!(
            "Fetched '{}': extract={} thumbnail={}",
            title,
            content.extract.is_some(),
            content.thumbnail.is_some()
        );
        Ok(content)
    }

    /// Normalization stage
    fn normalize(&self, title: String, content: ContentRecord) -> Answer {
        let answer = match content.extract {
            Some(extract) => match self.extract_budget {
                Some(budget) => truncate_chars(&extract, budget),
                None => extract,
            },
            None => NO_EXTRACT_ANSWER.to_string(),
        };

        Answer {
            sources: vec![self.wiki.article_url(&title)],
            title,
            answer,
            image: content.thumbnail,
        }
    }

    async fn call(&self, request: UpstreamRequest) -> Result<UpstreamResponse, UpstreamError> {
        match timeout(self.call_timeout, self.fetcher.fetch(request)).await {
            Ok(result) => result,
            Err(_) => Err(UpstreamError::Timeout),
        }
    }
}

/// Answers longer than this many characters are cut
pub const DEFAULT_EXTRACT_BUDGET: usize = 1200;

/// Keep at most `budget` characters. A plain prefix cut; it does not look
/// for word or sentence boundaries.
pub fn truncate_chars(text: &str, budget: usize) -> String {
    match text.char_indices().nth(budget) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}


#[cfg(test)]
mod http_tests {
    use super::*;
    use crate::config::WikipediaSettings;
    use crate::network::HttpClient;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn resolver_for(server: &MockServer) -> Resolver {
        let settings = WikipediaSettings {
            api_url: format!("{}/w/api.php", server.uri()),
            ..Default::default()
        };
        let client = HttpClient::new().unwrap();
        Resolver::new(Arc::new(client), MediaWiki::with_settings(&settings))
    }

    #[tokio::test]
    async fn resolves_through_both_endpoints() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/w/api.php"))
            .and(query_param("list", "search"))
            .and(query_param("srsearch", "theory of relativity"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "query": {"search": [{"title": "Theory of relativity"}]}
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/w/api.php"))
            .and(query_param("prop", "extracts|pageimages"))
            .and(query_param("titles", "Theory of relativity"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "query": {"pages": {"30001": {
                    "title": "Theory of relativity",
                    "extract": "The theory of relativity usually encompasses two interrelated physics theories."
                }}}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let answer = resolver_for(&server)
            .resolve(&Question::from("theory of relativity"))
            .await;

        assert_eq!(answer.title, "Theory of relativity");
        assert_eq!(
            answer.sources,
            vec!["https://en.wikipedia.org/wiki/Theory_of_relativity"]
        );
        assert!(answer.answer.starts_with("The theory of relativity"));
        assert_eq!(answer.image, None);
    }

    #[tokio::test]
    async fn upstream_5xx_becomes_error_answer() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let resolver = resolver_for(&server);
        let result = resolver.try_resolve(&Question::from("anything")).await;
        let err = tokio_test::assert_err!(result);
        assert_eq!(err, ResolveError::Upstream(UpstreamError::Status(503)));
    }

    #[tokio::test]
    async fn unreachable_upstream_becomes_error_answer() {
        let server = MockServer::start().await;
        let resolver = resolver_for(&server);
        drop(server);

        let answer = resolver.resolve(&Question::from("Albert Einstein")).await;
        assert_eq!(answer, Answer::error());
    }
}
