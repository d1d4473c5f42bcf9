//! SmartAgro Marketplace Server - 农产品交易市场服务
//!
//! # 架构概述
//!
//! - **存储** (`storage`): redb 嵌入式事务存储 (用户、商品、订单、账本)
//! - **认证** (`auth`): Argon2 密码 + cookie 会话
//! - **HTTP API** (`api`): JSON 接口
//! - **定价/账本**: 见 `shared::pricing` 与 `shared::ledger`
//!
//! # 模块结构
//!
//! ```text
//! agro-server/src/
//! ├── core/          # 配置、状态、错误、服务器
//! ├── auth/          # 会话、extractor
//! ├── storage/       # redb 存储层
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 日志等工具
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod storage;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentSession, SessionStore};
pub use core::{Config, Server, ServerError, ServerState};
pub use storage::{MarketStorage, StorageError};
pub use utils::{AppError, AppResult, ErrorCode};

// Re-export logger functions
pub use utils::logger::init_logger_with_file;

/// 准备运行环境: 加载 .env, 创建工作目录, 初始化日志
pub fn setup_environment() -> Result<Config, ServerError> {
    dotenv::dotenv().ok();

    let config = Config::from_env();
    std::fs::create_dir_all(&config.work_dir)?;

    let log_dir = config.log_dir();
    init_logger_with_file(
        Some(&config.log_level),
        Some(config.log_json),
        config.is_production().then_some(log_dir.as_path()),
    );

    Ok(config)
}

pub fn print_banner() {
    println!(
        r#"
   _____                      __  ___
  / ___/____ ___  ____ ______/ /_/   | ____ __________
  \__ \/ __ `__ \/ __ `/ ___/ __/ /| |/ __ `/ ___/ __ \
 ___/ / / / / / / /_/ / /  / /_/ ___ / /_/ / /  / /_/ /
/____/_/ /_/ /_/\__,_/_/   \__/_/  |_\__, /_/   \____/
                                    /____/
    "#
    );
}
