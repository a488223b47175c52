mod commands;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use eventlist::api::ApiClient;
use eventlist::core::config::ClientConfig;
use eventlist::core::EventId;

#[derive(Parser)]
#[command(name = "eventlist")]
#[command(about = "List, add, edit and delete events stored behind a REST /events resource")]
struct Cli {
    /// Base URL of the events API (overrides config and EVENTLIST_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Log requests and state changes to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show all events
    List,
    /// Create an event
    Add {
        /// Event name
        name: String,

        /// Start date (e.g. "2024-02-01")
        #[arg(short, long)]
        start: String,

        /// End date (e.g. "2024-02-02")
        #[arg(short, long)]
        end: String,
    },
    /// Change fields of an existing event
    Update {
        id: EventId,

        /// New event name
        #[arg(short, long)]
        name: Option<String>,

        /// New start date
        #[arg(short, long)]
        start: Option<String>,

        /// New end date
        #[arg(short, long)]
        end: Option<String>,
    },
    /// Delete an event
    Delete { id: EventId },
    /// Print the event table as HTML
    Html,
    /// Browse and edit events interactively
    Interactive,
    /// Show the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = ClientConfig::load()?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }

    let connect = || ApiClient::new(&config);

    match cli.command {
        Commands::List => commands::list::run(connect()?).await,
        Commands::Add { name, start, end } => commands::add::run(connect()?, name, start, end).await,
        Commands::Update {
            id,
            name,
            start,
            end,
        } => commands::update::run(connect()?, id, name, start, end).await,
        Commands::Delete { id } => commands::delete::run(connect()?, id).await,
        Commands::Html => commands::html::run(connect()?).await,
        Commands::Interactive => commands::interactive::run(connect()?).await,
        Commands::Config => commands::config::run(&config),
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "eventlist=debug" } else { "eventlist=warn" };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();
}
