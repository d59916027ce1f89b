//! MediaWiki query API
//!
//! Builds the two upstream requests the resolver needs (full-text search and
//! extract/thumbnail lookup) and parses their responses. Nothing here performs
//! I/O; requests are executed through a [`Fetcher`](crate::network::Fetcher).

mod types;

pub use types::ContentRecord;

use crate::config::WikipediaSettings;
use crate::network::{UpstreamError, UpstreamRequest, UpstreamResponse};
use types::{ContentResponse, SearchResponse};

/// Thumbnail sizes the upstream is asked for are kept in this range
pub const MIN_THUMBNAIL_SIZE: u32 = 400;
pub const MAX_THUMBNAIL_SIZE: u32 = 1000;

/// MediaWiki endpoint description
#[derive(Debug, Clone)]
pub struct MediaWiki {
    api_url: String,
    article_url: String,
    lang: String,
    search_limit: u32,
    thumbnail_size: u32,
    intro_only: bool,
}

impl MediaWiki {
    pub fn new() -> Self {
        Self::with_settings(&WikipediaSettings::default())
    }

    pub fn with_settings(settings: &WikipediaSettings) -> Self {
        Self {
            api_url: settings.api_url.clone(),
            article_url: settings.article_url.clone(),
            lang: settings.base_lang().to_string(),
            search_limit: settings.search_limit.max(1),
            thumbnail_size: settings
                .thumbnail_size
                .clamp(MIN_THUMBNAIL_SIZE, MAX_THUMBNAIL_SIZE),
            intro_only: settings.intro_only,
        }
    }

    /// Query API URL for the configured language
    pub fn api_url(&self) -> String {
        self.api_url.replace("{lang}", &self.lang)
    }

    /// Full-text search for the question
    pub fn search_request(&self, question: &str) -> UpstreamRequest {
        UpstreamRequest::get(self.api_url())
            .param("action", "query")
            .param("list", "search")
            .param("srsearch", question)
            .param("srlimit", self.search_limit.to_string())
            .param("srprop", "")
            .param("format", "json")
            .param("utf8", "1")
    }

    /// Title of the top search hit, `None` when there are no hits
    pub fn parse_search(&self, response: UpstreamResponse) -> Result<Option<String>, UpstreamError> {
        let response = response.error_for_status()?;
        let parsed: SearchResponse = response.json()?;

        Ok(parsed
            .query
            .and_then(|q| q.search.into_iter().next())
            .map(|hit| hit.title))
    }

    /// Plain-text extract and thumbnail for an exact title
    pub fn content_request(&self, title: &str) -> UpstreamRequest {
        let mut request = UpstreamRequest::get(self.api_url())
            .param("action", "query")
            .param("prop", "extracts|pageimages")
            .param("titles", title)
            .param("explaintext", "1");
        if self.intro_only {
            request = request.param("exintro", "1");
        }
        request
            .param("piprop", "thumbnail")
            .param("pithumbsize", self.thumbnail_size.to_string())
            .param("redirects", "1")
            .param("format", "json")
            .param("utf8", "1")
    }

    /// The single page in the content response
    pub fn parse_content(&self, response: UpstreamResponse) -> Result<ContentRecord, UpstreamError> {
        let response = response.error_for_status()?;
        let parsed: ContentResponse = response.json()?;

        let pages = parsed
            .query
            .and_then(|q| q.pages)
            .ok_or(UpstreamError::MissingField("query.pages"))?;

        // Keyed by page id; the title is already exact so one entry is expected
        let page = pages
            .into_values()
            .next()
            .ok_or(UpstreamError::MissingField("query.pages"))?;

        Ok(page.into())
    }

    /// Canonical article URL for a title
    pub fn article_url(&self, title: &str) -> String {
        let slug = title.trim().replace(' ', "_");
        self.article_url
            .replace("{lang}", &self.lang)
            .replace("{title}", &urlencoding::encode(&slug))
    }
}

impl Default for MediaWiki {
    fn default() -> Self {
        Self::new()
    }
}
