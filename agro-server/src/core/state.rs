use std::sync::Arc;
use std::time::Instant;

use crate::auth::SessionStore;
use crate::core::{Config, Result};
use crate::storage::MarketStorage;

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc 实现浅拷贝，clone 成本极低。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Arc<Config> | 配置项 (不可变) |
/// | storage | MarketStorage | redb 存储 (用户/商品/订单/账本) |
/// | sessions | SessionStore | 内存会话表 |
/// | started_at | Instant | 启动时间 (health uptime) |
#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub storage: MarketStorage,
    pub sessions: SessionStore,
    pub started_at: Instant,
}

impl ServerState {
    pub fn new(config: Config, storage: MarketStorage) -> Self {
        Self {
            config: Arc::new(config),
            storage,
            sessions: SessionStore::new(),
            started_at: Instant::now(),
        }
    }

    /// 初始化服务器状态
    ///
    /// 1. 创建工作目录
    /// 2. 打开 (或创建) `WORK_DIR/market.redb`
    pub fn initialize(config: &Config) -> Result<Self> {
        std::fs::create_dir_all(&config.work_dir)?;

        let db_path = config.database_path();
        let storage = MarketStorage::open(&db_path)?;
        tracing::info!(path = %db_path.display(), "Market database ready");

        Ok(Self::new(config.clone(), storage))
    }

    /// 运行时间 (秒)
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
