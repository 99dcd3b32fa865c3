//! 题目生成 - 业务能力层
//!
//! 按顺序尝试多个模型后端，第一个成功的结果直接返回；
//! 全部失败时返回固定的失败文本，而不是错误。

use anyhow::Result;
use futures::future::BoxFuture;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::services::llm_service::LlmService;

/// 所有后端都失败时返回的固定文本
pub const GENERATION_FAILED_SENTINEL: &str = "❌ Failed to generate questions.";

/// 每篇文章要求生成的题目数量
pub const QUESTION_COUNT: usize = 7;

/// 生成题目的模型后端
pub trait QuestionBackend: Send + Sync {
    /// 后端名称（模型名），用于日志
    fn name(&self) -> &str;

    /// 发送提示词，返回模型的原始文本
    fn complete<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<String>>;
}

/// 题目生成器
pub struct QuestionGenerator {
    backends: Vec<Box<dyn QuestionBackend>>,
}

impl QuestionGenerator {
    /// 使用给定的后端列表，按列表顺序尝试
    pub fn new(backends: Vec<Box<dyn QuestionBackend>>) -> Self {
        Self { backends }
    }

    /// 首选模型 + 备用模型
    pub fn from_config(config: &Config) -> Self {
        let backends = LlmService::chain_from_config(config)
            .into_iter()
            .map(|service| Box::new(service) as Box<dyn QuestionBackend>)
            .collect();
        Self::new(backends)
    }

    pub fn backend_names(&self) -> Vec<&str> {
        self.backends.iter().map(|b| b.name()).collect()
    }

    /// 生成题目原始文本
    ///
    /// 不会返回错误：所有后端都失败时返回 [`GENERATION_FAILED_SENTINEL`]
    pub async fn generate(&self, passage_text: &str) -> String {
        let prompt = build_prompt(passage_text);

        for backend in &self.backends {
            info!("🤖 尝试模型: {}...", backend.name());
            match backend.complete(&prompt).await {
                Ok(text) => {
                    info!("✓ 模型 {} 返回 {} 字符", backend.name(), text.chars().count());
                    return text;
                }
                Err(e) => {
                    warn!("⚠️ 模型 {} 调用失败: {:#}", backend.name(), e);
                }
            }
        }

        error!("❌ 全部 {} 个模型均未能生成题目", self.backends.len());
        GENERATION_FAILED_SENTINEL.to_string()
    }

    /// 是否为生成失败的固定文本
    pub fn is_failure(raw: &str) -> bool {
        raw == GENERATION_FAILED_SENTINEL
    }
}

/// 构建要求模型按固定格式出题的提示词
pub fn build_prompt(passage_text: &str) -> String {
    format!(
        r#"Based on this passage, generate exactly {count} reading comprehension questions.

IMPORTANT: Use EXACTLY this format for each question:

**1. Question text here?**
A) First choice text
B) Second choice text
C) Third choice text
D) Fourth choice text
Answer: C

**2. Next question here?**
A) Choice A text
B) Choice B text
C) Choice C text
D) Choice D text
Answer: B

(Continue for all {count} questions)

Passage:
{passage}"#,
        count = QUESTION_COUNT,
        passage = passage_text
    )
}
