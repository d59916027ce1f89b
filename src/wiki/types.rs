//! MediaWiki API response shapes

use serde::Deserialize;
use std::collections::BTreeMap;

/// `action=query&list=search` response
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub query: Option<SearchQuery>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub search: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
pub struct SearchHit {
    pub title: String,
}

/// `action=query&prop=extracts|pageimages` response
#[derive(Debug, Deserialize)]
pub struct ContentResponse {
    pub query: Option<ContentQuery>,
}

#[derive(Debug, Deserialize)]
pub struct ContentQuery {
    /// Pages keyed by opaque page id (negative for missing pages)
    pub pages: Option<BTreeMap<String, Page>>,
}

#[derive(Debug, Deserialize)]
pub struct Page {
    pub extract: Option<String>,
    pub thumbnail: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
pub struct Thumbnail {
    pub source: String,
}

/// Extract and thumbnail for a single article
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentRecord {
    pub extract: Option<String>,
    pub thumbnail: Option<String>,
}

impl From<Page> for ContentRecord {
    fn from(page: Page) -> Self {
        Self {
            // An empty extract is treated like a missing one
            extract: page.extract.filter(|e| !e.trim().is_empty()),
            thumbnail: page.thumbnail.map(|t| t.source),
        }
    }
}
