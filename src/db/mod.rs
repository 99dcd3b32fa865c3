//! 数据访问层
//!
//! 持有 SQLite 连接池，按实体拆分查询：
//! - `document` - 文档的创建与读取
//! - `question` - 题目与选项的批量写入、读取
//! - `response` - 答题记录

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::info;

use crate::error::AppResult;

mod document;
mod question;
mod response;
mod schema;

pub use question::{insert_answer, insert_question};
pub use response::GradedAnswer;

/// 数据库句柄
#[derive(Clone)]
pub struct Db {
    pool: SqlitePool,
}

impl Db {
    /// 连接数据库并初始化表结构
    pub async fn connect(url: &str) -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        // 内存数据库每个连接都是独立的库，只能用单连接
        let pool_options = if url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = pool_options.connect_with(options).await?;

        sqlx::query("SELECT 1").execute(&pool).await?;

        schema::create_schema(&pool).await?;

        info!("💾 数据库连接已验证");

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[cfg(test)]
pub(crate) async fn memory_db() -> Db {
    Db::connect("sqlite::memory:")
        .await
        .expect("failed to create in-memory database")
}
