//! 日志工具模块
//!
//! 提供日志初始化、格式化和输出的辅助函数

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::workflow::{ProcessResult, UploadOutcome};

/// 初始化日志
///
/// `RUST_LOG` 优先；否则 `verbose` 为 true 时使用 debug 级别，默认 info
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 文章出题模式");
    info!("🤖 模型顺序: {}", config.model_chain().join(" → "));
    info!("💾 数据库: {}", config.database_url);
    info!("{}", "=".repeat(60));
    if config.llm_api_key.is_empty() {
        warn!("⚠️ 未设置 LLM_API_KEY，模型调用很可能失败");
    }
}

/// 输出一次上传的处理结果
pub fn log_upload_outcome(outcome: &UploadOutcome) {
    info!("\n{}", "─".repeat(60));
    info!(
        "📄 文档 #{}: {}",
        outcome.document.id,
        truncate_text(&outcome.document.title, 40)
    );
    match outcome.result {
        ProcessResult::Saved { questions } => info!("✅ 已保存 {} 道题目", questions),
        ProcessResult::GenerationFailed => warn!("❌ 题目生成失败，文档没有题目"),
        ProcessResult::PersistFailed => warn!("❌ 题目保存失败，已回滚"),
        ProcessResult::NoText => warn!("⚠️ 文档没有正文"),
    }
    info!("{}", "─".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
