use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use eventlist_core::config::ServerConfig;
use eventlist_server::{AppState, DEFAULT_RESOURCE};
use tokio::net::TcpListener;

#[derive(Parser)]
#[command(name = "eventlist-server")]
#[command(about = "Serve an in-memory /events collection for local development")]
struct Args {
    /// Port to listen on (defaults to the configured port, 3000)
    #[arg(short, long)]
    port: Option<u16>,

    /// JSON file to load events from and save them to
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Resource path to serve
    #[arg(long, default_value = DEFAULT_RESOURCE)]
    resource: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "eventlist_server=info,tower_http=info".into()),
        )
        .init();

    let args = Args::parse();
    let config = ServerConfig::load()?;

    let port = args.port.unwrap_or(config.port);
    let state = match args.data.or(config.data_file) {
        Some(path) => AppState::with_data_file(path).await?,
        None => AppState::new(),
    };

    let app = eventlist_server::app(state, &args.resource);

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("eventlist-server listening on http://{}/{}", addr, args.resource.trim_matches('/'));

    axum::serve(listener, app).await?;

    Ok(())
}
