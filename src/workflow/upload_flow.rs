//! 上传处理流程 - 流程层
//!
//! 核心职责：定义"一篇文档"上传后的出题流程
//!
//! 流程顺序：
//! 1. 保存文档
//! 2. 截断正文 → 生成题目 → 解析 → 入库
//!
//! 第 2 步是尽力而为的：任何失败都只体现在 [`ProcessResult`] 里，上传本身仍然成功。

use serde::Serialize;
use tracing::{info, warn};

use crate::config::Config;
use crate::db::Db;
use crate::error::AppResult;
use crate::models::Document;
use crate::services::{PersistenceWriter, QuestionGenerator, ResponseParser};
use crate::workflow::upload_ctx::UploadCtx;

/// 出题结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProcessResult {
    /// 题目已保存
    Saved { questions: usize },
    /// 所有模型都失败，文档没有题目
    GenerationFailed,
    /// 写库失败，已回滚
    PersistFailed,
    /// 文档没有正文
    NoText,
}

/// 一次上传的处理结果
#[derive(Debug, Clone, Serialize)]
pub struct UploadOutcome {
    pub document: Document,
    pub result: ProcessResult,
}

/// 上传出题流程
///
/// - 编排 生成 → 解析 → 入库
/// - 不持有任何模型或连接细节，只依赖业务能力（services）
pub struct QuizPipeline {
    db: Db,
    generator: QuestionGenerator,
    parser: ResponseParser,
    writer: PersistenceWriter,
    max_passage_chars: usize,
}

impl QuizPipeline {
    /// 使用配置中的模型创建流程
    pub fn new(config: &Config, db: Db) -> AppResult<Self> {
        Self::with_generator(db, QuestionGenerator::from_config(config), config.max_passage_chars)
    }

    /// 使用自定义生成器创建流程
    pub fn with_generator(db: Db, generator: QuestionGenerator, max_passage_chars: usize) -> AppResult<Self> {
        let parser = ResponseParser::new()?;
        Ok(Self {
            writer: PersistenceWriter::new(db.clone()),
            db,
            generator,
            parser,
            max_passage_chars,
        })
    }

    /// 处理一次上传：保存文档后尽力生成题目
    ///
    /// 只有保存文档本身失败才会返回错误
    pub async fn process_upload(&self, title: &str, parsed_text: Option<&str>) -> AppResult<UploadOutcome> {
        let document = self.db.create_document(title, parsed_text).await?;
        let result = self.generate_for(&document).await;
        Ok(UploadOutcome { document, result })
    }

    /// 为已有文档重新出题
    pub async fn regenerate(&self, document_id: i64) -> AppResult<UploadOutcome> {
        let document = self.db.get_document(document_id).await?;
        let result = self.generate_for(&document).await;
        Ok(UploadOutcome { document, result })
    }

    async fn generate_for(&self, document: &Document) -> ProcessResult {
        let ctx = UploadCtx::new(document);

        let text = match document.parsed_text.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => text,
            _ => {
                warn!("{} ⚠️ 文档没有正文，跳过出题", ctx);
                return ProcessResult::NoText;
            }
        };

        let passage = truncate_chars(text, self.max_passage_chars);
        info!("{} 🤖 正在生成题目 (正文 {} 字符)...", ctx, passage.chars().count());

        let raw = self.generator.generate(passage).await;
        let generation_failed = QuestionGenerator::is_failure(&raw);
        if generation_failed {
            warn!("{} ⚠️ 所有模型均失败，文档将没有题目", ctx);
        }

        let parsed = self.parser.parse(&raw);
        info!("{} 🔍 解析得到 {} 道题目", ctx, parsed.len());

        if !self.writer.persist(document, &parsed).await {
            return ProcessResult::PersistFailed;
        }

        if generation_failed {
            ProcessResult::GenerationFailed
        } else {
            ProcessResult::Saved {
                questions: parsed.len(),
            }
        }
    }
}

/// 按字符数截断（不会切断多字节字符）
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
