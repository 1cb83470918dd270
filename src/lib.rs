//! # Noticeboard
//!
//! A retrieval-augmented question answering backend for plaintext circulars
//! and notices.
//!
//! Noticeboard ingests `.txt` documents from a directory, splits them into
//! overlapping word-windowed chunks, embeds each chunk via an
//! OpenAI-compatible API, and stores the vectors in a remote HTTP vector
//! index. Questions are answered by embedding the question, retrieving the
//! top-matching chunks, and asking a chat model to compose an answer
//! grounded in that context.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────┐   ┌──────────────┐   ┌────────────┐   ┌──────────────┐
//! │ documents │──▶│   chunker    │──▶│ embeddings │──▶│ vector index │
//! │ (*.txt)   │   │ word windows │   │    API     │   │   (remote)   │
//! └───────────┘   └──────────────┘   └────────────┘   └──────┬───────┘
//!                                                            │
//!                    question ──▶ embed ──▶ search ──────────┘
//!                                              │
//!                                              ▼
//!                                   context ──▶ chat model ──▶ answer
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! noticeboard --config ./config/noticeboard.toml ingest
//! noticeboard --config ./config/noticeboard.toml serve
//! noticeboard --config ./config/noticeboard.toml ask "When is the fee deadline?"
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Core data types |
//! | [`documents`] | Document enumeration from the source directory |
//! | [`chunk`] | Overlapping word-window chunking |
//! | [`embedding`] | Embedding + synthesis client (OpenAI-compatible) |
//! | [`index`] | Remote vector index client |
//! | [`ingest`] | Batch ingestion orchestration |
//! | [`query`] | Question answering orchestration |
//! | [`server`] | JSON HTTP server |

pub mod chunk;
pub mod config;
pub mod documents;
pub mod embedding;
pub mod index;
pub mod ingest;
pub mod models;
pub mod query;
pub mod server;
