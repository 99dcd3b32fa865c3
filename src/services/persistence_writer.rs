//! 题目入库 - 业务能力层
//!
//! 一次上传的全部题目和选项在同一个事务中写入：要么全部可见，要么全部回滚。

use tracing::{debug, error, info};

use crate::db::{insert_answer, insert_question, Db};
use crate::error::AppResult;
use crate::models::{Document, GeneratedQuestion};
use crate::utils::logging::truncate_text;

/// 题目写入服务
#[derive(Clone)]
pub struct PersistenceWriter {
    db: Db,
}

impl PersistenceWriter {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// 保存解析出的题目
    ///
    /// 失败时记录日志并返回 `false`，不会把错误抛给调用方
    pub async fn persist(&self, document: &Document, parsed_questions: &[GeneratedQuestion]) -> bool {
        info!(
            "🔄 正在保存 {} 道题目 (文档 #{})...",
            parsed_questions.len(),
            document.id
        );

        match self.write_batch(document.id, parsed_questions).await {
            Ok(()) => {
                info!("🎉 已保存 {} 道题目及全部选项", parsed_questions.len());
                true
            }
            Err(e) => {
                error!("❌ 题目保存失败，整批已回滚: {}", e);
                false
            }
        }
    }

    async fn write_batch(&self, document_id: i64, parsed_questions: &[GeneratedQuestion]) -> AppResult<()> {
        let mut tx = self.db.pool().begin().await?;

        for question in parsed_questions {
            debug!("📝 创建题目: {}", truncate_text(&question.question_text, 50));
            let question_id = insert_question(&mut *tx, document_id, &question.question_text).await?;

            for answer in &question.answers {
                insert_answer(&mut *tx, question_id, answer).await?;
                debug!(
                    "   📍 选项 {}: {}",
                    answer.choice_letter,
                    truncate_text(&answer.choice_text, 30)
                );
            }
            match question.correct_answer() {
                Some(correct) => debug!("✅ 题目 {} 已保存，正确答案 {}", question_id, correct.choice_letter),
                None => debug!("✅ 题目 {} 已保存，未标记正确答案", question_id),
            }
        }

        // 出错时 tx 被 drop，事务自动回滚
        tx.commit().await?;
        Ok(())
    }
}
