//! # Passage Quiz
//!
//! 根据上传的文章自动生成阅读理解选择题的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用四层架构：
//!
//! ### ① 数据层（Db）
//! - `db/` - 持有 SQLite 连接池，只暴露读写能力
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"
//! - `LlmService` - 调用单个模型
//! - `QuestionGenerator` - 首选模型 / 备用模型依次尝试
//! - `ResponseParser` - 模型输出 → 结构化题目
//! - `PersistenceWriter` - 题目整批事务写入
//! - `GradingService` - 答题评分
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一篇文档"的完整处理流程
//! - `QuizPipeline` - 流程编排（保存文档 → 生成 → 解析 → 入库）
//!
//! ### ④ 入口（main）
//! - 读取配置、初始化日志、连接数据库、运行流程
//!
//! ## 模块结构

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use db::Db;
pub use error::{AppError, AppResult};
pub use models::{ChoiceLetter, Document, GeneratedAnswer, GeneratedQuestion};
pub use services::{
    GradingService, PersistenceWriter, QuestionBackend, QuestionGenerator, ResponseParser,
    GENERATION_FAILED_SENTINEL,
};
pub use workflow::{ProcessResult, QuizPipeline, UploadOutcome};
