//! # Noticeboard CLI
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `noticeboard ingest` | One-shot batch ingestion of the documents directory |
//! | `noticeboard serve` | Start the JSON HTTP server |
//! | `noticeboard ask "<question>"` | Answer a question from the terminal |
//!
//! All commands accept a `--config` flag pointing to a TOML configuration
//! file. See `config/noticeboard.example.toml` for a full example.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use noticeboard::{config, embedding, index, ingest, query, server};

/// Noticeboard — retrieval-augmented question answering over plaintext
/// circulars and notices.
#[derive(Parser)]
#[command(
    name = "noticeboard",
    about = "Retrieval-augmented question answering over plaintext circulars",
    version,
    long_about = "Noticeboard ingests plaintext documents into a remote vector index \
    and answers natural-language questions by retrieving the most relevant chunks \
    and asking a chat model to compose a context-grounded answer."
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/noticeboard.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Ingest all documents from the configured directory.
    ///
    /// Provisions the vector index if needed, chunks and embeds every
    /// matching document, and writes the result as a single batch.
    /// Exits non-zero if provisioning or the batch write fails; individual
    /// chunk embedding failures are logged and skipped.
    Ingest,

    /// Start the HTTP server.
    ///
    /// Serves `POST /rag-query` and `GET /health` on the configured bind
    /// address until the process is terminated.
    Serve,

    /// Answer a single question from the command line.
    ///
    /// Runs the same retrieval and synthesis pipeline as the server and
    /// prints the answer with its sources.
    Ask {
        /// The question to answer.
        question: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Ingest => {
            let model = embedding::OpenAiClient::new(&cfg.openai)?;
            let indexer = index::RemoteIndex::new(&cfg.index)?;
            ingest::run_ingest(&cfg, &model, &indexer).await?;
        }
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
        Commands::Ask { question } => {
            let model = embedding::OpenAiClient::new(&cfg.openai)?;
            let indexer = index::RemoteIndex::new(&cfg.index)?;
            let answer = query::answer_question(&cfg, &model, &indexer, &question).await?;

            println!("{}", answer.answer);
            println!();
            println!("  context chunks: {}", answer.context_chunks);
            for source in &answer.sources {
                println!("  source: {}", source);
            }
        }
    }

    Ok(())
}
