//! Notesearch CLI - rank Markdown notes from the command line

mod corpus;

use anyhow::Result;
use clap::{Parser, Subcommand};
use corpus::Note;
use notesearch::{highlight_text, SearchEngine, SearchOptions, SearchResult};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "notesearch")]
#[command(
    author,
    version,
    about = "Notesearch - in-memory full-text search over Markdown notes"
)]
#[command(propagate_version = true)]
struct Cli {
    /// Notes directory (category folders of Markdown files)
    #[arg(long, short = 'd', env = "NOTESEARCH_DATA_DIR", default_value = "data")]
    data_dir: PathBuf,

    /// JSON array of documents to search instead of the notes directory
    #[arg(long, env = "NOTESEARCH_DOCS")]
    docs: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search notes
    Search {
        /// Search query
        query: String,

        /// Maximum number of results
        #[arg(long, short = 'n', default_value = "50")]
        limit: usize,

        /// Disable fuzzy matching for weak hits
        #[arg(long)]
        no_fuzzy: bool,

        /// Only show notes in this category
        #[arg(long, short = 'c')]
        category: Option<String>,

        /// Mark matches in titles with <mark> tags
        #[arg(long)]
        highlight: bool,

        /// Output format (text, json)
        #[arg(long, short = 'o', default_value = "text")]
        format: String,
    },

    /// Show index statistics
    Stats {
        /// Output format (text, json)
        #[arg(long, short = 'o', default_value = "text")]
        format: String,
    },

    /// Print the index tokens of a text
    Tokenize {
        /// Text to tokenize
        text: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Search {
            query,
            limit,
            no_fuzzy,
            category,
            highlight,
            format,
        } => {
            let notes = load_notes(&cli.data_dir, cli.docs.as_deref())?;
            let options = SearchOptions::default()
                .with_fuzzy(!no_fuzzy)
                .with_limit(limit);
            cmd_search(notes, &query, &options, category.as_deref(), highlight, &format)
        }
        Commands::Stats { format } => {
            let notes = load_notes(&cli.data_dir, cli.docs.as_deref())?;
            cmd_stats(notes, &format)
        }
        Commands::Tokenize { text } => cmd_tokenize(&text),
    }
}

fn load_notes(data_dir: &Path, docs: Option<&Path>) -> Result<Vec<Note>> {
    match docs {
        Some(path) => corpus::load_json(path),
        None => corpus::load_dir(data_dir),
    }
}

fn cmd_search(
    notes: Vec<Note>,
    query: &str,
    options: &SearchOptions,
    category: Option<&str>,
    highlight: bool,
    format: &str,
) -> Result<()> {
    let engine = SearchEngine::new(notes)?;

    let results: Vec<SearchResult<'_, Note>> = engine
        .search(query, options)
        .into_iter()
        .filter(|r| category.is_none() || r.item.category.as_deref() == category)
        .collect();

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    if results.is_empty() {
        println!("No results found for '{}'", query);
        return Ok(());
    }

    println!("Found {} results for '{}':\n", results.len(), query);
    for (rank, result) in results.iter().enumerate() {
        let title = if highlight {
            highlight_text(&result.item.title, query)
        } else {
            result.item.title.clone()
        };

        println!(
            "{:>3}. [{:.3}] #{} {}",
            rank + 1,
            result.score,
            result.item.id,
            title
        );

        if let Some(category) = &result.item.category {
            match &result.item.sub_category {
                Some(sub) => println!("     {}/{}", category, sub),
                None => println!("     {}", category),
            }
        }

        for field_match in &result.matches {
            let spans: Vec<String> = field_match
                .indices
                .iter()
                .map(|[start, end]| format!("{}..{}", start, end))
                .collect();
            println!("     {}: {}", field_match.field, spans.join(", "));
        }
    }

    Ok(())
}

fn cmd_stats(notes: Vec<Note>, format: &str) -> Result<()> {
    let engine = SearchEngine::new(notes)?;
    let stats = engine.stats();

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("Notesearch {}", notesearch::VERSION);
        println!("  Documents:       {}", stats.documents);
        println!("  Vocabulary:      {}", stats.vocabulary);
        println!("  Total tokens:    {}", stats.total_tokens);
        println!("  Avg doc length:  {:.2}", stats.average_document_length);
    }

    Ok(())
}

fn cmd_tokenize(text: &str) -> Result<()> {
    for token in notesearch::tokenize(text) {
        println!("{}", token);
    }
    Ok(())
}
