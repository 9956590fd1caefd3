use std::sync::Arc;

use anyhow::{Context, Result};
use protocol::{Listener, TcpListener};
use tictactoe_server::{serve, ServerConfig, ServerState};
use tokio::sync::Mutex;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::load();

    // 初始化日志，RUST_LOG 优先
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .context("无效的日志过滤规则")?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .init();

    info!("井字棋服务端启动中...");

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("无法监听 {}", addr))?;

    let state = Arc::new(Mutex::new(ServerState::new(config)));
    serve(listener, state).await;

    Ok(())
}
