use clap::Parser;
use mimalloc::MiMalloc;
use std::net::SocketAddr;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tubegate_api::AppState;
use tubegate_domain::CliOverrides;
use tubegate_jobs::{join_all, CacheLimitJob, IdentityRotationJob, JobRunner};

mod bootstrap;
mod di;
mod server;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[command(name = "tubegate")]
#[command(version)]
#[command(about = "Tubegate - search gateway with rotating identities and a response cache")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// HTTP listener port
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Response cache database path
    #[arg(long, value_name = "FILE")]
    cache_path: Option<String>,

    /// Disable the response cache
    #[arg(long)]
    no_cache: bool,

    /// IPv6 block (CIDR) to draw outbound source addresses from
    #[arg(long, value_name = "CIDR")]
    source_block: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        port: cli.port,
        bind_address: cli.bind.clone(),
        cache_path: cli.cache_path.clone(),
        no_cache: cli.no_cache,
        source_block: cli.source_block.clone(),
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config.logging);

    info!("Starting Tubegate v{}", env!("CARGO_PKG_VERSION"));

    let pool = if config.cache.enabled {
        Some(bootstrap::init_database(&config.cache).await?)
    } else {
        warn!("Response cache disabled");
        None
    };

    let services = di::Services::new(&config, pool);
    let use_cases = di::UseCases::new(&services);

    let warmed = services.identities.warm_up().await;
    info!(identities = warmed, "Identity pool warmed up");

    let shutdown = CancellationToken::new();

    let mut runner = JobRunner::new()
        .with_identity_rotation(
            IdentityRotationJob::new(services.identities.clone())
                .with_interval(config.identity.rotation_interval_secs),
        )
        .with_shutdown_token(shutdown.clone());
    if config.cache.enabled {
        runner = runner.with_cache_limit(
            CacheLimitJob::new(services.cache.clone())
                .with_interval(config.cache.eviction_interval_secs),
        );
    }
    let job_handles = runner.start().await;

    let app_state = AppState {
        search_tracks: use_cases.search_tracks,
        clear_cache: use_cases.clear_cache,
    };

    let web_addr: SocketAddr = format!("{}:{}", config.server.bind_address, config.server.port)
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid bind address: {}", e))?;

    tokio::spawn(wait_for_signal(shutdown.clone()));

    if let Err(e) = server::start_web_server(web_addr, app_state, shutdown.clone()).await {
        error!(error = %e, "Web server error");
        shutdown.cancel();
        join_all(job_handles).await;
        return Err(e);
    }

    shutdown.cancel();
    join_all(job_handles).await;

    info!("Server shutdown complete");
    Ok(())
}

async fn wait_for_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }

    shutdown.cancel();
}
