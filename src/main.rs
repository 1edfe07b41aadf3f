mod accumulator;
mod cli;
mod error;
mod monitor;
mod platform;
mod server;
mod store;
mod tracker;

use std::sync::Arc;

use clap::Parser;
use cli::{Args, Config};
use error::Result;
use log::{error, info};
use monitor::ServerMetrics;
use server::DashboardServer;
use store::StateStore;
use tracker::TrafficTracker;

#[tokio::main]
async fn main() -> Result<()> {
    // 解析命令行参数
    let args = Args::parse();

    // 初始化日志
    env_logger::Builder::new()
        .filter_level(args.log_level.parse().unwrap_or(log::LevelFilter::Info))
        .init();

    // 加载配置
    let config = Config::load(&args).map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;
    let listen_addr = config.listen_addr()?;

    let metrics = Arc::new(ServerMetrics::new());
    let source = platform::create_source(config.counter_source)?;
    let store = StateStore::new(&config.data_file);
    info!(
        "Tracking interface {} (cap {} GB), state file {}",
        config.interface,
        config.traffic,
        store.path().display()
    );

    let tracker = Arc::new(TrafficTracker::new(
        source,
        store,
        config.interface.clone(),
        config.traffic,
        Arc::clone(&metrics),
    ));

    let server = DashboardServer::bind(
        listen_addr,
        tracker,
        config.dashboard_info(),
        Arc::clone(&metrics),
    )?;
    info!("Dashboard listening on http://{}", server.local_addr()?);

    server
        .run(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for shutdown signal: {}", e);
                std::future::pending::<()>().await;
            }
        })
        .await?;

    info!("Served {}", metrics.snapshot());
    Ok(())
}
