//! Vector index collaborator.
//!
//! Defines the [`VectorIndex`] trait plus [`RemoteIndex`], a thin client
//! for an HTTP vector store with three endpoints: index provisioning,
//! point upsert, and nearest-neighbour search.

use anyhow::{bail, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use crate::config::IndexConfig;
use crate::models::{SearchMatch, VectorRecord};

/// Vector storage and retrieval capabilities consumed by the orchestrators.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Create the index if it does not exist. "Already exists" is success.
    async fn ensure_index(&self, dimension: usize) -> Result<()>;

    /// Write a batch of records. The index becomes the durable owner.
    async fn upsert(&self, records: &[VectorRecord]) -> Result<()>;

    /// Return up to `top_k` nearest neighbours, ranked best-first by
    /// cosine similarity.
    async fn search(&self, vector: &[f32], top_k: usize) -> Result<Vec<SearchMatch>>;
}

/// HTTP client for the remote vector index service.
pub struct RemoteIndex {
    http: reqwest::Client,
    base_url: String,
    index_name: String,
}

impl RemoteIndex {
    pub fn new(config: &IndexConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            index_name: config.name.clone(),
        })
    }
}

/// Wire shape of one search hit. Metadata is nested on the wire but
/// flattened into [`SearchMatch`] for the rest of the pipeline.
#[derive(Deserialize)]
struct WireMatch {
    #[serde(default)]
    score: f64,
    #[serde(default)]
    metadata: WireMetadata,
    #[serde(default)]
    text: String,
}

#[derive(Deserialize, Default)]
struct WireMetadata {
    #[serde(default)]
    title: String,
    #[serde(default)]
    source: String,
}

impl From<WireMatch> for SearchMatch {
    fn from(m: WireMatch) -> Self {
        SearchMatch {
            score: m.score,
            title: m.metadata.title,
            source: m.metadata.source,
            text: m.text,
        }
    }
}

#[async_trait]
impl VectorIndex for RemoteIndex {
    async fn ensure_index(&self, dimension: usize) -> Result<()> {
        let body = serde_json::json!({
            "name": self.index_name,
            "dimension": dimension,
            "metric": "cosine",
            "metadata_schema": {
                "title": "string",
                "source": "string",
            },
        });

        let response = self
            .http
            .post(format!("{}/indices", self.base_url))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        // 409 means the index already exists, which is fine.
        if status.is_success() || status.as_u16() == 409 {
            return Ok(());
        }

        let body_text = response.text().await.unwrap_or_default();
        bail!("Failed to create index {}: {} {}", self.index_name, status, body_text);
    }

    async fn upsert(&self, records: &[VectorRecord]) -> Result<()> {
        let points: Vec<serde_json::Value> = records
            .iter()
            .map(|r| {
                serde_json::json!({
                    "id": r.id,
                    "vector": r.vector,
                    "metadata": { "title": r.title, "source": r.source },
                    "text": r.text,
                })
            })
            .collect();

        let body = serde_json::json!({
            "index": self.index_name,
            "points": points,
        });

        let response = self
            .http
            .post(format!("{}/points/upsert", self.base_url))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            bail!("Upsert failed: {} {}", status, body_text);
        }

        Ok(())
    }

    async fn search(&self, vector: &[f32], top_k: usize) -> Result<Vec<SearchMatch>> {
        let body = serde_json::json!({
            "index": self.index_name,
            "vector": vector,
            "top_k": top_k,
        });

        let response = self
            .http
            .post(format!("{}/points/search", self.base_url))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            bail!("Search failed: {} {}", status, body_text);
        }

        let json: serde_json::Value = response.json().await?;
        parse_search_response(json)
    }
}

/// Extract the hit list from a search response.
///
/// The canonical field is `matches`; older deployments of the index service
/// return `results` instead, which is accepted as a compatibility shim.
/// A response carrying neither yields zero matches.
fn parse_search_response(json: serde_json::Value) -> Result<Vec<SearchMatch>> {
    let hits = json
        .get("matches")
        .or_else(|| json.get("results"))
        .cloned()
        .unwrap_or_else(|| serde_json::Value::Array(Vec::new()));

    let wire: Vec<WireMatch> =
        serde_json::from_value(hits).map_err(|e| anyhow::anyhow!("Invalid search response: {}", e))?;

    Ok(wire.into_iter().map(SearchMatch::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search_response_matches_field() {
        let json = serde_json::json!({
            "matches": [
                {
                    "id": "policy.txt-0",
                    "score": 0.91,
                    "metadata": { "title": "policy.txt", "source": "data/policy.txt" },
                    "text": "Deadline is May 1"
                }
            ]
        });
        let matches = parse_search_response(json).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].title, "policy.txt");
        assert_eq!(matches[0].source, "data/policy.txt");
        assert_eq!(matches[0].text, "Deadline is May 1");
        assert!((matches[0].score - 0.91).abs() < 1e-9);
    }

    #[test]
    fn test_parse_search_response_results_shim() {
        let json = serde_json::json!({
            "results": [
                { "score": 0.5, "metadata": { "title": "a.txt" }, "text": "alpha" }
            ]
        });
        let matches = parse_search_response(json).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].title, "a.txt");
        // Missing source stays empty; the query layer substitutes "unknown".
        assert!(matches[0].source.is_empty());
    }

    #[test]
    fn test_parse_search_response_neither_field() {
        let json = serde_json::json!({ "took_ms": 3 });
        let matches = parse_search_response(json).unwrap();
        assert!(matches.is_empty());
    }
}
