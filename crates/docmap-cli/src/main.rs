//! docmap CLI - page inventory for published documentation sites

use clap::{Parser, ValueEnum};
use docmap::{
    build_inventory, render_figpack, render_json, render_text, Fetcher, InventoryError,
    InventoryOptions, InventoryResult,
};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Output format for the inventory
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Pretty-printed JSON of the whole result
    #[default]
    Json,
    /// Human-readable report
    Text,
    /// figpack docPages schema
    Figpack,
}

/// docmap - map documentation pages back to their source files
#[derive(Parser, Debug)]
#[command(name = "docmap")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Base URL of the documentation site (Sphinx or MkDocs)
    docs_url: String,

    /// Source repository base URL for source files (e.g. a GitHub blob path)
    #[arg(
        long = "source-repo",
        visible_aliases = ["github-repo", "github"],
        value_name = "URL"
    )]
    source_repo: Option<String>,

    /// Output file (default: stdout)
    #[arg(long, short, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output format
    #[arg(long, short, value_enum, default_value_t)]
    format: OutputFormat,

    /// Validate that source URLs are reachable (slower)
    #[arg(long)]
    validate: bool,

    /// Enable debug logging
    #[arg(long, short)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    initialize_logging(cli.verbose);

    let fetcher = Fetcher::new().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });

    let options = InventoryOptions {
        source_repo_url: cli.source_repo.clone(),
        validate: cli.validate,
    };

    let result = match build_inventory(&fetcher, &cli.docs_url, &options).await {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let rendered = match render(&result, cli.format) {
        Ok(rendered) => rendered,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    match &cli.output {
        Some(path) => {
            if let Err(e) = std::fs::write(path, &rendered) {
                eprintln!("Error writing {}: {e}", path.display());
                std::process::exit(1);
            }
            info!(path = %path.display(), "Output written");
        }
        None => writeln_safe(&rendered),
    }
}

/// Diagnostics go to stderr so piping the result stays clean
fn initialize_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn render(result: &InventoryResult, format: OutputFormat) -> Result<String, InventoryError> {
    match format {
        OutputFormat::Json => render_json(result),
        OutputFormat::Text => Ok(render_text(result)),
        OutputFormat::Figpack => render_figpack(result),
    }
}

/// Write to stdout, exit silently on broken pipe
fn writeln_safe(s: &str) {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if let Err(e) = writeln!(handle, "{}", s) {
        if e.kind() == io::ErrorKind::BrokenPipe {
            std::process::exit(0);
        }
        eprintln!("Error writing to stdout: {}", e);
        std::process::exit(1);
    }
}
