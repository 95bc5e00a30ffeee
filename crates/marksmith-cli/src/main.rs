//! Command-line interface for Marksmith.
//!
//! Three subcommands: `serve` runs the HTTP conversion server, `detect`
//! classifies a file from its content without converting it, and `convert`
//! runs the full classify-and-convert flow against a local file.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use marksmith::{ConversionConfig, DocumentConverter, MarkitdownConverter, classify};

#[derive(Parser)]
#[command(name = "marksmith", version, about = "Content-sniffing document to Markdown conversion")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP conversion server
    Serve {
        /// IP address to bind to
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value_t = 8000)]
        port: u16,

        /// Path to a marksmith.toml (otherwise discovered from the current
        /// directory upward)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Classify a file from its content and print the result as JSON
    Detect {
        /// File to classify
        file: PathBuf,
    },

    /// Convert a file to Markdown
    Convert {
        /// File to convert
        file: PathBuf,

        /// Write Markdown here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn load_config(explicit: Option<PathBuf>) -> anyhow::Result<ConversionConfig> {
    match explicit {
        Some(path) => ConversionConfig::from_toml_file(&path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None => Ok(ConversionConfig::discover()?.unwrap_or_default()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { host, port, config } => {
            let config = load_config(config)?;
            marksmith::api::serve_with_config(&host, port, config).await?;
        }

        Commands::Detect { file } => {
            let bytes = std::fs::read(&file).with_context(|| format!("failed to read {}", file.display()))?;
            let hint = file.file_name().and_then(|name| name.to_str());
            let result = classify(&bytes, hint)?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }

        Commands::Convert { file, output } => {
            let bytes = std::fs::read(&file).with_context(|| format!("failed to read {}", file.display()))?;
            let hint = file.file_name().and_then(|name| name.to_str());
            let result = classify(&bytes, hint)?;

            tracing::info!(format = %result.format_label, "classified input file");

            let converter = MarkitdownConverter::from_discovered_config()?;
            let markdown = converter.convert(&bytes, &result.format_label).await?;

            match output {
                Some(path) => {
                    std::fs::write(&path, &markdown).with_context(|| format!("failed to write {}", path.display()))?;
                    tracing::info!(output = %path.display(), "wrote converted Markdown");
                }
                None => print!("{}", markdown),
            }
        }
    }

    Ok(())
}
