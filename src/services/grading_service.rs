//! 答题评分 - 业务能力层
//!
//! 按已保存的正确答案给一次提交打分，并把结果写入答题记录

use std::collections::HashSet;

use tracing::info;

use crate::db::{Db, GradedAnswer};
use crate::error::{AppError, AppResult, DbError};
use crate::models::{QuizResult, QuizSubmission};

const ANONYMOUS: &str = "Anonymous";

/// 评分服务
#[derive(Clone)]
pub struct GradingService {
    db: Db,
}

impl GradingService {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// 提交答题并评分
    ///
    /// - 文档没有题目时拒绝提交
    /// - 引用的题目必须属于该文档，选项必须属于该题目
    /// - 同一题目只能作答一次
    /// - 每答对一题得 1 分，总分按文档题目总数计算
    pub async fn submit(&self, submission: &QuizSubmission) -> AppResult<QuizResult> {
        let document = self.db.get_document(submission.document_id).await?;

        let total_questions = self.db.questions_count(document.id).await?;
        if total_questions == 0 {
            return Err(DbError::NoQuestions {
                document_id: document.id,
            }
            .into());
        }

        let mut graded = Vec::with_capacity(submission.answers.len());
        let mut seen = HashSet::new();
        for selection in &submission.answers {
            if !seen.insert(selection.question_id) {
                return Err(DbError::DuplicateSelection {
                    question_id: selection.question_id,
                }
                .into());
            }

            let question = self.db.get_question(selection.question_id).await?;
            if question.document_id != document.id {
                return Err(AppError::not_found("question", selection.question_id));
            }

            let answer = self.db.get_answer(selection.selected_answer_id).await?;
            if answer.question_id != question.id {
                return Err(AppError::not_found("answer", selection.selected_answer_id));
            }

            graded.push(GradedAnswer {
                question_id: question.id,
                selected_answer_id: answer.id,
                is_correct: answer.is_correct,
            });
        }

        let score = graded.iter().filter(|g| g.is_correct).count() as i64;
        let user_name = submission
            .user_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(ANONYMOUS);

        let response_id = self
            .db
            .record_response(document.id, user_name, score, total_questions, &graded)
            .await?;

        info!(
            "📊 {} 在《{}》得分 {}/{}",
            user_name, document.title, score, total_questions
        );

        Ok(QuizResult {
            response_id,
            score,
            total_questions,
            percentage: percentage(score, total_questions),
        })
    }
}

/// 得分百分比，保留两位小数
pub fn percentage(score: i64, total: i64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let raw = score as f64 / total as f64 * 100.0;
    (raw * 100.0).round() / 100.0
}
