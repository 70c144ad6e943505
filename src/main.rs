//! docdeck CLI: terminal frontend for a vector-document backend.

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use serde_json::Value;

use docdeck::client::BackendClient;
use docdeck::config::{self, Settings};
use docdeck::model::{DocType, default_index_config};

#[derive(Parser)]
#[command(name = "docdeck", version, about = "Terminal frontend for a vector-document backend")]
struct Cli {
    /// Backend base URL (overrides DOCDECK_BACKEND_URL and the config file).
    #[arg(long, global = true)]
    backend_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive TUI (the default).
    Ui,

    /// List indexed documents.
    List,

    /// Index a new document.
    Add {
        /// Document type: pdf, webpage, or manual.
        #[arg(long)]
        doc_type: DocType,

        /// URL for webpages, file path for PDFs, or inline text for manual docs.
        #[arg(long)]
        source: String,

        /// Ingestion config as a JSON object (defaults to chunk_size 1000,
        /// chunk_overlap 200).
        #[arg(long)]
        config: Option<String>,
    },

    /// Delete a document by ID.
    Delete {
        /// Backend-assigned document ID.
        doc_id: String,
    },

    /// Search indexed documents.
    Search {
        /// Free-text query.
        query: String,

        /// Number of results to return.
        #[arg(long, default_value = "5", value_parser = clap::value_parser!(u8).range(1..=10))]
        top_k: u8,
    },

    /// Persist a backend URL to the config file.
    SetUrl {
        /// Backend base URL, e.g. http://127.0.0.1:8000
        url: String,
    },
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Ui) {
        Commands::Ui => {
            let client = connect(cli.backend_url)?;
            docdeck::tui::launch(client)
        }

        Commands::List => {
            let client = connect(cli.backend_url)?;
            let docs = client.list_documents()?;
            if docs.is_empty() {
                println!("No documents indexed yet.");
            } else {
                println!("{}", serde_json::to_string_pretty(&docs).into_diagnostic()?);
            }
            Ok(())
        }

        Commands::Add {
            doc_type,
            source,
            config,
        } => {
            let config: Value = match config {
                Some(text) => serde_json::from_str(&text).into_diagnostic()?,
                None => default_index_config(),
            };

            let client = connect(cli.backend_url)?;
            let resp = client.index_document(doc_type, &source, config)?;
            match resp.get("doc_id").and_then(Value::as_str) {
                Some(id) => println!("Document indexed: {id}"),
                None => miette::bail!("backend response missing doc_id: {resp}"),
            }
            Ok(())
        }

        Commands::Delete { doc_id } => {
            if doc_id.is_empty() {
                miette::bail!("doc_id must not be empty");
            }

            let client = connect(cli.backend_url)?;
            let resp = client.delete_document(&doc_id)?;
            match resp.get("doc_id").and_then(Value::as_str) {
                Some(id) => println!("Deleted: {id}"),
                None => miette::bail!("backend response missing doc_id: {resp}"),
            }
            Ok(())
        }

        Commands::Search { query, top_k } => {
            let client = connect(cli.backend_url)?;
            let resp = client.search_documents(&query, top_k as usize)?;
            let results = resp
                .get("results")
                .and_then(Value::as_array)
                .ok_or_else(|| miette::miette!("backend response missing results: {resp}"))?;

            if results.is_empty() {
                println!("No results.");
            }
            for (i, result) in results.iter().enumerate() {
                println!("Result {}:", i + 1);
                println!(
                    "{}",
                    serde_json::to_string_pretty(result).into_diagnostic()?
                );
            }
            Ok(())
        }

        Commands::SetUrl { url } => {
            let path = config::config_file()?;
            let settings = Settings {
                backend_url: Some(url),
            };
            settings.save(&path)?;
            println!("Backend URL saved to {}", path.display());
            Ok(())
        }
    }
}

/// Resolve the backend URL and build a client for it.
fn connect(flag: Option<String>) -> Result<BackendClient> {
    let base_url = config::resolve_backend_url(flag)?;
    Ok(BackendClient::new(&base_url))
}
