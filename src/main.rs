//! Medical KGQA CLI - main entry point
//!
//! Interactive question answering plus the data preparation and import steps
//! that build the knowledge graph it reads from.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Instant;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

use medical_kgqa::{commands, metrics, Config, GraphStore, Lexicon, MedicalQa, QueryExecutor};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "medical_kgqa")]
#[command(about = "Medical knowledge-graph question answering", long_about = None)]
#[command(version)]
struct Cli {
    /// Address to expose Prometheus metrics (e.g., 0.0.0.0:9898)
    #[arg(long, env = "METRICS_ADDR")]
    metrics_addr: Option<String>,

    /// Config file (default: ./config.yml, then ../config.yml)
    #[arg(short, long, env = "KGQA_CONFIG")]
    config: Option<PathBuf>,

    /// Disease lexicon CSV, overrides the config file
    #[arg(long)]
    lexicon: Option<PathBuf>,

    /// Per-query timeout in seconds (0 disables)
    #[arg(long)]
    query_timeout: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive question loop (default)
    Chat,

    /// Answer a single question and exit
    Ask {
        /// Question text
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },

    /// Split the raw disease table into import files
    Prepare {
        /// Raw disease table (CSV, disease name in the first column)
        #[arg(short, long, default_value = "disease3.csv")]
        input: PathBuf,

        /// Directory receiving Disease.csv, per-label files and the manifest
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,
    },

    /// Load prepared files into the graph
    Import {
        /// Directory holding the prepared files
        #[arg(short, long, default_value = ".")]
        data_dir: PathBuf,
    },
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Chat => "chat",
            Commands::Ask { .. } => "ask",
            Commands::Prepare { .. } => "prepare",
            Commands::Import { .. } => "import",
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env for local development
    let _ = dotenvy::dotenv();

    // Logs go to stderr; stdout carries the replies
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("medical_kgqa=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Some(addr) = cli.metrics_addr.as_deref() {
        match addr.parse::<SocketAddr>() {
            Ok(socket) => metrics::spawn_metrics_server(socket),
            Err(err) => warn!(%addr, "Invalid metrics address: {}", err),
        }
    }

    let command = cli.command.unwrap_or(Commands::Chat);
    let command_name = command.name();
    let start = Instant::now();

    let result = execute_command(command, cli.config, cli.lexicon, cli.query_timeout).await;

    metrics::record_command(command_name, start.elapsed(), result.is_ok());

    result
}

fn load_config(
    path: Option<PathBuf>,
    lexicon: Option<PathBuf>,
    query_timeout: Option<u64>,
) -> anyhow::Result<Config> {
    let mut config = match path {
        Some(path) => Config::load_from_file(&path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::load().context("loading config.yml")?,
    };

    if let Some(lexicon) = lexicon {
        config.lexicon_path = lexicon;
    }
    if let Some(secs) = query_timeout {
        config.graph.query_timeout_secs = secs;
    }
    Ok(config)
}

async fn build_pipeline(config: &Config) -> anyhow::Result<MedicalQa<GraphStore>> {
    let lexicon = Lexicon::load(&config.lexicon_path);
    let store = GraphStore::connect(&config.graph)
        .await
        .with_context(|| format!("connecting to graph at {}", config.graph.uri))?;
    let executor = QueryExecutor::new(store).with_timeout(config.graph.query_timeout());

    Ok(MedicalQa::new(lexicon, config.intents.clone(), executor))
}

async fn execute_command(
    command: Commands,
    config_path: Option<PathBuf>,
    lexicon: Option<PathBuf>,
    query_timeout: Option<u64>,
) -> anyhow::Result<()> {
    match command {
        Commands::Chat => {
            let config = load_config(config_path, lexicon, query_timeout)?;
            let qa = build_pipeline(&config).await?;
            let stdin = BufReader::new(tokio::io::stdin());
            let mut stdout = std::io::stdout();

            tokio::select! {
                summary = commands::chat::run(&qa, stdin, &mut stdout) => {
                    summary.context("chat session failed")?;
                }
                _ = tokio::signal::ctrl_c() => {
                    info!("Interrupted, ending chat session");
                }
            }
        }
        Commands::Ask { question } => {
            let config = load_config(config_path, lexicon, query_timeout)?;
            let qa = build_pipeline(&config).await?;
            let question = question.join(" ");
            commands::ask::run(&qa, &question, &mut std::io::stdout()).await?;
        }
        Commands::Prepare { input, output_dir } => {
            let summary = commands::prepare::run(&input, &output_dir)
                .with_context(|| format!("preparing {}", input.display()))?;

            println!("Diseases: {}", summary.diseases);
            for ((label, vertices), (edge, edges)) in summary.vertices.iter().zip(&summary.edges) {
                println!("  {label:<14} {vertices:>6} names   {edge:<18} {edges:>6} links");
            }
            println!("Files written to {}", summary.output_dir.display());
        }
        Commands::Import { data_dir } => {
            let config = load_config(config_path, lexicon, query_timeout)?;
            let store = GraphStore::connect(&config.graph)
                .await
                .with_context(|| format!("connecting to graph at {}", config.graph.uri))?;

            let summary = commands::import::run(&store, &data_dir)
                .await
                .with_context(|| format!("importing {}", data_dir.display()))?;

            println!(
                "Imported {} diseases, {} attribute vertices, {} edges",
                summary.diseases, summary.vertices, summary.edges
            );
            if summary.unmatched_edges > 0 {
                println!("{} edges skipped: endpoints not found", summary.unmatched_edges);
            }
            for file in &summary.skipped_files {
                println!("  missing file skipped: {file}");
            }
        }
    }

    Ok(())
}
