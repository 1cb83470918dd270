//! Core data types that flow through the ingestion and query pipeline.

use serde::{Deserialize, Serialize};

/// A source file discovered under the documents directory.
#[derive(Debug, Clone)]
pub struct Document {
    /// File name, e.g. `"policy.txt"`. Used as the chunk title.
    pub name: String,
    /// Path relative to the documents directory, e.g. `"data/policy.txt"`.
    pub path: String,
    pub body: String,
}

/// One overlapping word-window of a document, ready for embedding.
#[derive(Debug, Clone)]
pub struct Chunk {
    pub document: String,
    /// Zero-based position within the owning document.
    pub index: usize,
    pub text: String,
}

impl Chunk {
    /// Deterministic point id: `"<document>-<index>"`.
    pub fn id(&self) -> String {
        format!("{}-{}", self.document, self.index)
    }
}

/// A chunk with its embedding, as written to the vector index.
#[derive(Debug, Clone, Serialize)]
pub struct VectorRecord {
    pub id: String,
    pub vector: Vec<f32>,
    pub title: String,
    pub source: String,
    pub text: String,
}

/// One nearest-neighbour hit returned by the vector index.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchMatch {
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub text: String,
}

/// The final response to a question.
#[derive(Debug, Clone, Serialize)]
pub struct Answer {
    pub answer: String,
    pub context_chunks: usize,
    pub sources: Vec<String>,
}

/// Summary counters returned by an ingestion run.
#[derive(Debug, Clone, Default)]
pub struct IngestReport {
    pub documents: usize,
    pub chunks_embedded: usize,
    pub chunks_failed: usize,
}
