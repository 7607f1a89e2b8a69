//! Folio CLI - browse Project Gutenberg books from the terminal

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Folio server to fetch books and analyses from
    #[arg(long, global = true, env = "FOLIO_SERVER", default_value = folio_core::remote::DEFAULT_SERVER_URL)]
    server: String,

    /// File holding saved books
    #[arg(long, global = true, env = "FOLIO_CACHE", default_value = "folio_cache.json")]
    cache: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a book by id (saved books are read locally)
    Fetch {
        /// Project Gutenberg book id
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print an LLM analysis of a book
    Summarize {
        /// Project Gutenberg book id
        id: String,
    },

    /// List saved books
    Saved {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Remove all saved books
    Clear,

    /// Browse books interactively
    Browse,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        "folio_cli=debug,folio_core=debug"
    } else {
        "folio_cli=info"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let ctx = commands::Context {
        server: cli.server,
        cache: cli.cache,
    };

    match cli.command {
        Commands::Fetch { id, json } => commands::fetch(&ctx, &id, json).await,

        Commands::Summarize { id } => commands::summarize(&ctx, &id).await,

        Commands::Saved { json } => commands::saved(&ctx, json),

        Commands::Clear => commands::clear(&ctx),

        Commands::Browse => commands::browse(&ctx).await,
    }
}
