use std::sync::Arc;

use anyhow::Context;
use booking_engine::{
    ApiState, CatalogSeed, Config, ConflictPolicy, MemoryStore, Server, SystemClock,
    setup_environment,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 加载 .env 和配置
    dotenv::dotenv().ok();
    let config = Config::from_env();

    // 2. 日志
    setup_environment(&config);
    tracing::info!(environment = %config.environment, "Booking store starting...");

    // 3. 存储 + 种子数据
    let store = MemoryStore::new(Arc::new(SystemClock), ConflictPolicy::new(config.timezone()));
    if let Some(path) = &config.seed_file {
        let seed = CatalogSeed::from_file(path).context("loading catalog seed")?;
        store.load_seed(seed);
    } else {
        tracing::warn!("SEED_FILE not set, starting with an empty catalog");
    }
    let store = Arc::new(store);

    // 4. 启动 HTTP 服务器
    let server = Server::new(config, ApiState::new(store.clone(), store));
    server.run().await.context("store API")?;

    Ok(())
}
