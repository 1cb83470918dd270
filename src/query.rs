//! Query orchestration: embed the question, retrieve context, synthesize.
//!
//! The context string is assembled in the order the index returned the
//! matches (ranked best-first by the index; not re-sorted here), one line
//! per match as `[<title>] <text>`, separated by blank lines. When the
//! index returns nothing, a fixed sentinel replaces the context so the
//! model can say the information is missing instead of hallucinating.

use anyhow::{bail, Context, Result};

use crate::config::Config;
use crate::embedding::LanguageModel;
use crate::index::VectorIndex;
use crate::models::{Answer, SearchMatch};

/// Context handed to synthesis when retrieval comes back empty.
const EMPTY_CONTEXT_SENTINEL: &str = "No relevant information found in the indexed documents.";

/// Source identifier used for matches missing a source field.
const UNKNOWN_SOURCE: &str = "unknown";

pub async fn answer_question(
    config: &Config,
    model: &dyn LanguageModel,
    index: &dyn VectorIndex,
    question: &str,
) -> Result<Answer> {
    if question.trim().is_empty() {
        bail!("question must not be empty");
    }

    let query_vector = model
        .embed(question)
        .await
        .context("Failed to embed question")?;

    let matches = index
        .search(&query_vector, config.index.top_k)
        .await
        .context("Vector search failed")?;

    let context = build_context(&matches);

    let answer = model
        .synthesize(question, &context)
        .await
        .context("Answer synthesis failed")?;

    let sources = matches
        .iter()
        .map(|m| {
            if m.source.is_empty() {
                UNKNOWN_SOURCE.to_string()
            } else {
                m.source.clone()
            }
        })
        .collect();

    Ok(Answer {
        answer,
        context_chunks: matches.len(),
        sources,
    })
}

/// Format retrieved matches into the context block fed to synthesis.
fn build_context(matches: &[SearchMatch]) -> String {
    if matches.is_empty() {
        return EMPTY_CONTEXT_SENTINEL.to_string();
    }

    matches
        .iter()
        .map(|m| {
            let title = if m.title.is_empty() {
                "Unknown"
            } else {
                m.title.as_str()
            };
            format!("[{}] {}", title, m.text)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
