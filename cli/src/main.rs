use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use search_cli::{
    build_server, ingest, load_config, load_documents, run_demo, run_match, run_search,
    OutputFormat, StatusArg,
};
use search_core::{SearchConfig, SearchServer};
use tracing_subscriber::{fmt, EnvFilter};

use std::io::Write;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "search-cli")]
#[command(about = "Index documents in memory and query them with TF-IDF ranking")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ConfigArgs {
    /// JSON file with `max_results` / `relevance_epsilon`
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the maximum number of ranked hits
    #[arg(long)]
    max_results: Option<usize>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Args)]
struct EngineArgs {
    /// Space-delimited stop words
    #[arg(long, default_value = "")]
    stop_words: String,
    /// Input documents: a .json/.jsonl file, a directory, or `-` for JSON lines on stdin
    #[arg(long)]
    input: String,
    #[command(flatten)]
    config: ConfigArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the top ranked documents for each query
    Search {
        #[command(flatten)]
        engine: EngineArgs,
        /// Query text, e.g. "fluffy cat -dog" (repeatable)
        #[arg(long = "query", required = true)]
        queries: Vec<String>,
        /// Only rank documents with this status
        #[arg(long, value_enum, default_value_t = StatusArg::Actual)]
        status: StatusArg,
    },
    /// Match each query against every document in insertion order
    Match {
        #[command(flatten)]
        engine: EngineArgs,
        #[arg(long = "query", required = true)]
        queries: Vec<String>,
    },
    /// Run the built-in walkthrough
    Demo {
        #[command(flatten)]
        config: ConfigArgs,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(std::io::stderr).init();
    let cli = Cli::parse();
    let mut out = std::io::stdout().lock();

    match cli.command {
        Commands::Search { engine, queries, status } => {
            let format = engine.config.format;
            let server = open_engine(&engine)?;
            run_search(&server, &queries, status.into(), format, &mut out)?;
        }
        Commands::Match { engine, queries } => {
            let format = engine.config.format;
            let server = open_engine(&engine)?;
            run_match(&server, &queries, format, &mut out)?;
        }
        Commands::Demo { config } => {
            run_demo(resolve_config(&config)?, config.format, &mut out)?;
        }
    }
    out.flush()?;
    Ok(())
}

fn resolve_config(args: &ConfigArgs) -> Result<SearchConfig> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(max_results) = args.max_results {
        config.max_results = max_results;
    }
    Ok(config)
}

fn open_engine(args: &EngineArgs) -> Result<SearchServer> {
    let mut server = build_server(&args.stop_words, resolve_config(&args.config)?)?;
    let docs = load_documents(&args.input)?;
    ingest(&mut server, docs);
    Ok(server)
}
