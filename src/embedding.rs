//! Language-model collaborator: embeddings and answer synthesis.
//!
//! Defines the [`LanguageModel`] trait the orchestrators depend on, plus
//! [`OpenAiClient`], which speaks the OpenAI-compatible HTTP API
//! (`/embeddings` and `/chat/completions`). The orchestrators only ever see
//! the trait, so tests drive them with in-memory fakes instead.
//!
//! There is no retry here: a failed call surfaces to the caller, which
//! either skips the chunk (ingestion) or fails the request (query).

use anyhow::{bail, Result};
use async_trait::async_trait;
use std::time::Duration;

use crate::config::OpenAiConfig;

/// System instruction for answer synthesis. Restricts the model to the
/// retrieved context and makes it admit when the context is insufficient.
const SYNTHESIS_SYSTEM_PROMPT: &str =
    "You answer questions based on college circulars and notices. \
     Answer only from the provided context and be concise. If the context \
     does not contain the relevant information, say so explicitly.";

/// Sampling temperature for synthesis: mild variability over determinism.
const SYNTHESIS_TEMPERATURE: f64 = 0.7;

/// Embedding and answer-synthesis capabilities consumed by the orchestrators.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Map text to a fixed-dimension embedding vector.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Compose a context-grounded answer to `question`.
    async fn synthesize(&self, question: &str, context: &str) -> Result<String>;
}

/// Client for an OpenAI-compatible embeddings + chat API.
///
/// The API key is read from `OPENAI_API_KEY` at construction time so a
/// misconfigured process fails at startup rather than mid-ingestion.
pub struct OpenAiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    embedding_model: String,
    chat_model: String,
}

impl OpenAiClient {
    pub fn new(config: &OpenAiConfig) -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| anyhow::anyhow!("OPENAI_API_KEY environment variable not set"))?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            embedding_model: config.embedding_model.clone(),
            chat_model: config.chat_model.clone(),
        })
    }
}

#[async_trait]
impl LanguageModel for OpenAiClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let body = serde_json::json!({
            "model": self.embedding_model,
            "input": text,
        });

        let response = self
            .http
            .post(format!("{}/embeddings", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            bail!("Embeddings API error {}: {}", status, body_text);
        }

        let json: serde_json::Value = response.json().await?;
        parse_embedding_response(&json)
    }

    async fn synthesize(&self, question: &str, context: &str) -> Result<String> {
        let prompt = format!(
            "Context from circulars:\n{}\n\nQuestion: {}\n\n\
             Provide a concise, clear answer based only on the provided \
             context. If the context doesn't contain relevant information, \
             say so.",
            context, question
        );

        let body = serde_json::json!({
            "model": self.chat_model,
            "messages": [
                { "role": "system", "content": SYNTHESIS_SYSTEM_PROMPT },
                { "role": "user", "content": prompt },
            ],
            "temperature": SYNTHESIS_TEMPERATURE,
        });

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            bail!("Chat API error {}: {}", status, body_text);
        }

        let json: serde_json::Value = response.json().await?;
        parse_chat_response(&json)
    }
}

/// Extract `data[0].embedding` from an embeddings API response.
fn parse_embedding_response(json: &serde_json::Value) -> Result<Vec<f32>> {
    let embedding = json
        .get("data")
        .and_then(|d| d.as_array())
        .and_then(|d| d.first())
        .and_then(|item| item.get("embedding"))
        .and_then(|e| e.as_array())
        .ok_or_else(|| anyhow::anyhow!("Invalid embeddings response: missing data[0].embedding"))?;

    Ok(embedding
        .iter()
        .map(|v| v.as_f64().unwrap_or(0.0) as f32)
        .collect())
}

/// Extract `choices[0].message.content` from a chat completions response.
fn parse_chat_response(json: &serde_json::Value) -> Result<String> {
    let content = json
        .get("choices")
        .and_then(|c| c.as_array())
        .and_then(|c| c.first())
        .and_then(|choice| choice.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(|c| c.as_str())
        .ok_or_else(|| {
            anyhow::anyhow!("Invalid chat response: missing choices[0].message.content")
        })?;

    Ok(content.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_embedding_response() {
        let json = serde_json::json!({
            "data": [{ "embedding": [0.1, -0.25, 3.0] }]
        });
        let vec = parse_embedding_response(&json).unwrap();
        assert_eq!(vec.len(), 3);
        assert!((vec[1] + 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_parse_embedding_response_missing_data() {
        let json = serde_json::json!({ "error": "nope" });
        assert!(parse_embedding_response(&json).is_err());
    }

    #[test]
    fn test_parse_chat_response_trims() {
        let json = serde_json::json!({
            "choices": [{ "message": { "content": "  The deadline is May 1.\n" } }]
        });
        assert_eq!(
            parse_chat_response(&json).unwrap(),
            "The deadline is May 1."
        );
    }

    #[test]
    fn test_parse_chat_response_missing_choices() {
        let json = serde_json::json!({ "choices": [] });
        assert!(parse_chat_response(&json).is_err());
    }
}
