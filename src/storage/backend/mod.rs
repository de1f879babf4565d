//! SeaORM storage backend
//!
//! This module provides database storage using SeaORM,
//! supporting SQLite, MySQL/MariaDB, and PostgreSQL.

use std::sync::Arc;

use parking_lot::RwLock;
use sea_orm::DatabaseConnection;
use tracing::{info, warn};

use crate::errors::{IpdbError, Result};
use crate::storage::models::IndexState;

mod connection;
mod converters;
mod mutations;
mod query;

pub use connection::{connect_generic, connect_sqlite, run_migrations};
pub use converters::{model_to_range, range_to_active_model};

/// 从数据库 URL 推断数据库类型
pub fn infer_backend_from_url(database_url: &str) -> Result<String> {
    if database_url.starts_with("sqlite://")
        || database_url.ends_with(".db")
        || database_url.ends_with(".sqlite")
        || database_url == ":memory:"
    {
        Ok("sqlite".to_string())
    } else if database_url.starts_with("mysql://") || database_url.starts_with("mariadb://") {
        Ok("mysql".to_string())
    } else if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        Ok("postgres".to_string())
    } else {
        Err(IpdbError::database_config(format!(
            "无法从 URL 推断数据库类型: {}. 支持的 URL 格式: sqlite://, mysql://, mariadb://, postgres://",
            database_url
        )))
    }
}

/// SeaORM-based storage backend
///
/// 装载器和查询引擎共用同一个句柄值；索引生命周期状态
/// （`Empty` / `Ready`）显式地挂在句柄上，而不是进程级全局变量。
#[derive(Clone)]
pub struct SeaOrmStorage {
    db: DatabaseConnection,
    backend_name: String,
    state: Arc<RwLock<IndexState>>,
}

impl SeaOrmStorage {
    pub async fn new(database_url: &str, backend_name: &str) -> Result<Self> {
        if database_url.is_empty() {
            return Err(IpdbError::database_config("DATABASE_URL 未设置".to_string()));
        }

        // 根据不同数据库类型配置连接选项
        let db = if backend_name == "sqlite" {
            connect_sqlite(database_url).await?
        } else {
            connect_generic(database_url, backend_name).await?
        };

        let storage = SeaOrmStorage {
            db,
            backend_name: backend_name.to_string(),
            state: Arc::new(RwLock::new(IndexState::Empty)),
        };

        // 运行迁移（建表 + 复合索引）
        run_migrations(&storage.db).await?;

        // 表里已有数据时直接进入 Ready，否则保持 Empty 等待装载
        let existing = storage.count().await?;
        if existing > 0 {
            storage.mark_ready();
            info!("Found {} existing ip ranges, index is ready", existing);
        } else {
            info!("ip_ranges table is empty, waiting for a bulk load");
        }

        warn!(
            "{} Storage initialized.",
            storage.backend_name.to_uppercase()
        );
        Ok(storage)
    }

    /// 当前索引状态
    pub fn state(&self) -> IndexState {
        *self.state.read()
    }

    pub(crate) fn mark_ready(&self) {
        *self.state.write() = IndexState::Ready;
    }

    pub(crate) fn mark_empty(&self) {
        *self.state.write() = IndexState::Empty;
    }

    pub fn backend_name(&self) -> &str {
        &self.backend_name
    }

    /// 获取数据库连接（用于测试等需要直接访问数据库的场景）
    pub fn get_db(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_backend_from_url() {
        assert_eq!(infer_backend_from_url("sqlite://ipdb.db").unwrap(), "sqlite");
        assert_eq!(infer_backend_from_url("ranges.sqlite").unwrap(), "sqlite");
        assert_eq!(
            infer_backend_from_url("mysql://root@localhost/ipdb").unwrap(),
            "mysql"
        );
        assert_eq!(
            infer_backend_from_url("postgres://localhost/ipdb").unwrap(),
            "postgres"
        );
        assert!(infer_backend_from_url("mongodb://127.0.0.1:27017").is_err());
    }
}
