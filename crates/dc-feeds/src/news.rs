//! News feed adapter.
//!
//! The upstream aggregator drifts between field names per article, so each
//! canonical field is read through an explicit ordered candidate list with
//! a documented default. Schema drift shortens an article, it never drops
//! the batch.

use dc_core::models::NewsItem;
use serde_json::Value;

use crate::config::FeedConfig;
use crate::http::HttpFetch;

/// Source label stamped on every item from this adapter.
pub const SOURCE_LABEL: &str = "Nepal News API";

/// Candidate source field names per canonical field, tried in order.
const TITLE_FIELDS: &[&str] = &["title", "headline"];
const CONTENT_FIELDS: &[&str] = &["content", "description", "summary"];
const IMAGE_FIELDS: &[&str] = &["image", "thumbnail"];
const DATE_FIELDS: &[&str] = &["date", "published_at"];

/// First present, non-null candidate rendered as a string.
fn coalesce(article: &Value, candidates: &[&str]) -> Option<String> {
    candidates.iter().find_map(|field| {
        let v = article.get(*field)?;
        match v {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    })
}

/// Fetch the current news batch, surfacing transport failures to the
/// caller.
pub async fn try_fetch_news(
    http: &dyn HttpFetch,
    cfg: &FeedConfig,
) -> anyhow::Result<Vec<NewsItem>> {
    let body = http.get_json(&cfg.news_url).await?;
    Ok(parse_articles(&body))
}

/// Boundary variant: empty on any transport or parse failure.
pub async fn fetch_news(http: &dyn HttpFetch, cfg: &FeedConfig) -> Vec<NewsItem> {
    match try_fetch_news(http, cfg).await {
        Ok(items) => items,
        Err(err) => {
            log::warn!("news feed fetch failed: {err:#}");
            Vec::new()
        }
    }
}

fn parse_articles(body: &Value) -> Vec<NewsItem> {
    let Some(articles) = body.as_array() else {
        log::warn!("news feed did not return an article array");
        return Vec::new();
    };
    articles
        .iter()
        .enumerate()
        .map(|(index, article)| NewsItem {
            // positional fallback keeps ids stable within one batch
            id: coalesce(article, &["id"]).unwrap_or_else(|| index.to_string()),
            title: coalesce(article, TITLE_FIELDS).unwrap_or_default(),
            content: coalesce(article, CONTENT_FIELDS).unwrap_or_default(),
            image: coalesce(article, IMAGE_FIELDS).unwrap_or_default(),
            date: coalesce(article, DATE_FIELDS)
                .unwrap_or_else(|| chrono::Utc::now().to_rfc3339()),
            category: coalesce(article, &["category"]).unwrap_or_else(|| "general".into()),
            source: SOURCE_LABEL.into(),
        })
        .collect()
}
