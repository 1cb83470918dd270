//! Ingestion pipeline orchestration.
//!
//! Drives the batch write path: provision the index, enumerate documents,
//! chunk each one, embed chunks sequentially, and submit everything that
//! embedded successfully as a single upsert. A chunk whose embedding call
//! fails is logged and skipped; the run only aborts on index provisioning
//! or upsert failure.

use anyhow::{Context, Result};

use crate::chunk::chunk_words;
use crate::config::Config;
use crate::documents::scan_documents;
use crate::embedding::LanguageModel;
use crate::index::VectorIndex;
use crate::models::{Chunk, IngestReport, VectorRecord};

pub async fn run_ingest(
    config: &Config,
    model: &dyn LanguageModel,
    index: &dyn VectorIndex,
) -> Result<IngestReport> {
    println!("Starting ingestion...");

    index
        .ensure_index(config.index.dimension)
        .await
        .context("Index provisioning failed")?;

    let documents = scan_documents(config)?;

    let mut report = IngestReport::default();
    let mut batch: Vec<VectorRecord> = Vec::new();

    for document in &documents {
        println!("Processing file: {}", document.name);

        let chunks: Vec<Chunk> = chunk_words(
            &document.body,
            config.chunking.chunk_size,
            config.chunking.overlap,
        )
        .into_iter()
        .enumerate()
        .map(|(i, text)| Chunk {
            document: document.name.clone(),
            index: i,
            text,
        })
        .collect();

        // Chunks are embedded one at a time, in order, so a failure is
        // attributable to exactly one chunk and the rest still go through.
        for chunk in chunks {
            match model.embed(&chunk.text).await {
                Ok(vector) => {
                    batch.push(VectorRecord {
                        id: chunk.id(),
                        vector,
                        title: document.name.clone(),
                        source: document.path.clone(),
                        text: chunk.text,
                    });
                    report.chunks_embedded += 1;
                }
                Err(e) => {
                    eprintln!(
                        "Warning: failed to embed chunk {} of {}: {}",
                        chunk.index, document.name, e
                    );
                    report.chunks_failed += 1;
                }
            }
        }

        report.documents += 1;
    }

    if !batch.is_empty() {
        println!("Upserting {} vectors...", batch.len());
        index.upsert(&batch).await.context("Index write failed")?;
    }

    println!("ingest");
    println!("  documents: {}", report.documents);
    println!("  chunks embedded: {}", report.chunks_embedded);
    println!("  chunks failed: {}", report.chunks_failed);
    println!("ok");

    Ok(report)
}
