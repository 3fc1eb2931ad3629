use anyhow::Result;
use axum::Router;
use clap::Parser;
use ranker_core::{AnalysisConfig, Analyzer, MemoryStore, ResultStore, SledStore};
use server::{build_app, AppState, RequestLimits};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
    /// Directory of the on-disk result store; results are kept in memory when absent
    #[arg(long)]
    store: Option<PathBuf>,
    /// Analysis config (JSON)
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, default_value_t = 10)]
    max_resumes: usize,
    #[arg(long, default_value_t = 5 * 1024 * 1024)]
    max_file_bytes: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => AnalysisConfig::from_path(path)?,
        None => AnalysisConfig::default(),
    };
    let store: Arc<dyn ResultStore> = match &args.store {
        Some(dir) => Arc::new(SledStore::open(dir)?),
        None => {
            tracing::warn!("no --store given, results are lost on exit");
            Arc::new(MemoryStore::new())
        }
    };
    let state = AppState {
        analyzer: Arc::new(Analyzer::new(config)),
        store,
        limits: RequestLimits { max_resumes: args.max_resumes, max_file_bytes: args.max_file_bytes },
    };
    let app: Router = build_app(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
