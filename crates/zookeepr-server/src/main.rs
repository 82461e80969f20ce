//! # Zookeepr
//!
//! HTTP service and command-line interface for the Zookeepr animal store.
//!
//! ## Commands
//!
//! - `zookeepr serve` - Run the HTTP API and static pages
//! - `zookeepr query` - Filter stored animals from the command line
//! - `zookeepr show <id>` - Print a single animal
//! - `zookeepr status` - Show store statistics
//!
//! ## Example Usage
//!
//! ```bash
//! # Serve on the port from $PORT (default 3001)
//! zookeepr serve
//!
//! # Carnivores that are both sassy and brave
//! zookeepr query --diet carnivore --trait sassy --trait brave
//! ```

mod app;
mod commands;
mod http;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Zookeepr - Animal record service
#[derive(Parser)]
#[command(name = "zookeepr")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to the animals data file (overrides configuration)
    #[arg(short, long, global = true)]
    data_file: Option<PathBuf>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP service
    Serve {
        /// Address to bind
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,

        /// Directory with the static HTML pages
        #[arg(long)]
        public_dir: Option<PathBuf>,
    },

    /// Filter stored animals
    Query {
        /// Required personality trait (can be used multiple times)
        #[arg(short = 't', long = "trait")]
        traits: Vec<String>,

        /// Exact diet
        #[arg(long)]
        diet: Option<String>,

        /// Exact species
        #[arg(short, long)]
        species: Option<String>,

        /// Exact name
        #[arg(short, long)]
        name: Option<String>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        output: OutputFormat,
    },

    /// Print a single animal by id
    Show {
        /// Animal id
        id: String,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        output: OutputFormat,
    },

    /// Show store status and statistics
    Status,
}

#[derive(Clone, Debug, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration before logging so the configured level applies
    let mut config = match &cli.config {
        Some(path) => zookeepr_core::Config::load_from(path)?,
        None => zookeepr_core::Config::load()?,
    };

    // Setup logging
    let log_level = if cli.quiet {
        "error".to_string()
    } else {
        match cli.verbose {
            0 => config.general.log_level.clone(),
            1 => "debug".to_string(),
            _ => "trace".to_string(),
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level)))
        .init();

    debug!(level = %log_level, "Logging initialized");

    if let Some(data_file) = cli.data_file {
        config.storage.data_file = Some(data_file);
    }

    // Execute command
    match cli.command {
        Commands::Serve {
            host,
            port,
            public_dir,
        } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(public_dir) = public_dir {
                config.pages.public_dir = public_dir;
            }
            commands::serve::run(config).await
        }
        Commands::Query {
            traits,
            diet,
            species,
            name,
            output,
        } => commands::query::run(config, traits, diet, species, name, output),
        Commands::Show { id, output } => commands::show::run(config, &id, output),
        Commands::Status => commands::status::run(config),
    }
}
