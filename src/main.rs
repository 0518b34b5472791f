use clap::Parser;
use memrag::cli::commands::{Cli, Commands, Corpus};
use memrag::config::RagConfig;
use memrag::domain::entities::document::Metadata;
use memrag::infrastructure::providers::ProviderRegistry;
use memrag::MemRag;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("memrag=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = run_command(cli.command).await;
    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run_command(cmd: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::Search { query, corpus, top_k } => {
            let rag = MemRag::new(RagConfig::load()?)?;
            ingest(&rag, &corpus).await?;
            let hits = rag.retrieve(None, &query, top_k).await?;
            println!("{}", serde_json::to_string_pretty(&hits)?);
        }
        Commands::Ask { query, corpus, top_k, no_answer } => {
            let rag = MemRag::new(RagConfig::load()?)?;
            ingest(&rag, &corpus).await?;
            let result = rag.search(None, &query, top_k, !no_answer).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Providers => {
            let registry = ProviderRegistry::with_defaults();
            println!("embedding:  {}", registry.embedding_names().join(", "));
            println!("generation: {}", registry.generation_names().join(", "));
        }
    }
    Ok(())
}

async fn ingest(rag: &MemRag, corpus: &Corpus) -> Result<(), Box<dyn std::error::Error>> {
    let store = rag.store(None).await;
    let chunk_size = if corpus.whole {
        None
    } else {
        Some(corpus.chunk_size.unwrap_or(rag.config().chunk_size))
    };

    for path in &corpus.files {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
        let mut metadata = Metadata::new();
        metadata.insert("source".to_string(), Value::from(path.display().to_string()));
        rag.orchestrator()
            .add_document(store.as_ref(), &content, metadata, chunk_size)
            .await?;
    }
    Ok(())
}
