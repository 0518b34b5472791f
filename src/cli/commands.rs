use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "memrag", about = "Ephemeral in-memory retrieval-augmented generation")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Documents to load into the process-local store before querying.
#[derive(Args)]
pub struct Corpus {
    /// Text file to ingest (repeatable)
    #[arg(long = "file", short = 'f', required = true)]
    pub files: Vec<PathBuf>,
    /// Split files into chunks of this many words (defaults to MEMRAG_CHUNK_SIZE)
    #[arg(long)]
    pub chunk_size: Option<usize>,
    /// Store each file as a single document
    #[arg(long, conflicts_with = "chunk_size")]
    pub whole: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank ingested documents against a query
    Search {
        query: String,
        #[command(flatten)]
        corpus: Corpus,
        #[arg(long)]
        top_k: Option<usize>,
    },
    /// Retrieve context and generate an answer
    Ask {
        query: String,
        #[command(flatten)]
        corpus: Corpus,
        #[arg(long)]
        top_k: Option<usize>,
        /// Return retrieved sources only
        #[arg(long)]
        no_answer: bool,
    },
    /// List registered embedding and generation providers
    Providers,
}
