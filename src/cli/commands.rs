//! Command implementations for the Screenrack CLI.

use std::time::Instant;

use log::info;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::Result;
use crate::server;
use crate::service::ScreenrackService;
use crate::storage::{CorpusStore, MemoryCorpusStore};

/// Execute a CLI command.
pub async fn execute_command(args: ScreenrackArgs) -> Result<()> {
    match &args.command {
        Command::Serve(serve_args) => serve(serve_args.clone(), &args).await,
        Command::Index(index_args) => index(index_args.clone(), &args).await,
        Command::Search(search_args) => search(search_args.clone(), &args).await,
        Command::Count => count(&args).await,
    }
}

/// Run the HTTP query service until interrupted.
async fn serve(serve_args: ServeArgs, cli_args: &ScreenrackArgs) -> Result<()> {
    let config = cli_args.load_config()?;
    let bind = config.server.bind;
    let service = ScreenrackService::connect(config, !serve_args.skip_health_check).await?;
    let router = service.router()?;
    info!(
        "Serving screenshots from {}",
        service.config().paths.screenshots_dir.display()
    );
    server::serve(router, bind).await
}

/// Index new screenshots once and exit.
async fn index(index_args: IndexArgs, cli_args: &ScreenrackArgs) -> Result<()> {
    let config = cli_args.load_config()?;
    let dir = index_args
        .dir
        .unwrap_or_else(|| config.paths.screenshots_dir.clone());
    let service = ScreenrackService::connect(config, true).await?;

    let start_time = Instant::now();
    let report = service.pipeline().ingest(&dir).await?;

    output_result(
        "Indexing complete",
        &IndexResult {
            directory: dir.display().to_string(),
            report,
            duration_ms: start_time.elapsed().as_millis() as u64,
        },
        cli_args,
    )
}

/// Search the indexed screenshots.
async fn search(search_args: SearchArgs, cli_args: &ScreenrackArgs) -> Result<()> {
    let config = cli_args.load_config()?;
    let service = ScreenrackService::connect(config, false).await?;
    let engine = service.engine();
    let limit = search_args
        .limit
        .unwrap_or(engine.config().default_top_k);

    let results = engine.search_with_limit(&search_args.query, limit).await;
    output_result("Search complete", &results, cli_args)
}

/// Print the number of indexed documents. Needs no embedder.
async fn count(cli_args: &ScreenrackArgs) -> Result<()> {
    let config = cli_args.load_config()?;
    let store = MemoryCorpusStore::open(config.store_config()).await?;

    output_result(
        "Store statistics",
        &CountResult {
            store_path: config.paths.store_path.display().to_string(),
            documents: store.count().await?,
        },
        cli_args,
    )
}
