use super::Db;
use crate::error::{AppError, AppResult};
use crate::models::{QuizResponse, UserAnswer};

/// 单题作答结果，写入 user_answers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradedAnswer {
    pub question_id: i64,
    pub selected_answer_id: i64,
    pub is_correct: bool,
}

impl Db {
    /// 在一个事务中写入答题记录及每题的作答，返回记录 id
    pub async fn record_response(
        &self,
        document_id: i64,
        user_name: &str,
        score: i64,
        total_questions: i64,
        graded: &[GradedAnswer],
    ) -> AppResult<i64> {
        let mut tx = self.pool.begin().await?;

        let response_id: i64 = sqlx::query_scalar(
            "INSERT INTO quiz_responses (document_id, user_name, score, total_questions) \
             VALUES (?, ?, ?, ?) RETURNING id",
        )
        .bind(document_id)
        .bind(user_name)
        .bind(score)
        .bind(total_questions)
        .fetch_one(&mut *tx)
        .await?;

        for answer in graded {
            sqlx::query(
                "INSERT INTO user_answers (response_id, question_id, selected_answer_id, is_correct) \
                 VALUES (?, ?, ?, ?)",
            )
            .bind(response_id)
            .bind(answer.question_id)
            .bind(answer.selected_answer_id)
            .bind(answer.is_correct)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        tracing::info!("📝 已记录答题 #{response_id} (文档 #{document_id})");

        Ok(response_id)
    }

    pub async fn get_response(&self, response_id: i64) -> AppResult<QuizResponse> {
        sqlx::query_as::<_, QuizResponse>(
            "SELECT id, document_id, user_name, score, total_questions, submitted_at \
             FROM quiz_responses WHERE id = ?",
        )
        .bind(response_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::not_found("quiz response", response_id))
    }

    pub async fn user_answers_for_response(&self, response_id: i64) -> AppResult<Vec<UserAnswer>> {
        let answers = sqlx::query_as::<_, UserAnswer>(
            "SELECT id, response_id, question_id, selected_answer_id, is_correct \
             FROM user_answers WHERE response_id = ? ORDER BY id",
        )
        .bind(response_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(answers)
    }

    /// 某文档的全部答题记录，最新的在前
    pub async fn responses_for_document(&self, document_id: i64) -> AppResult<Vec<QuizResponse>> {
        let responses = sqlx::query_as::<_, QuizResponse>(
            "SELECT id, document_id, user_name, score, total_questions, submitted_at \
             FROM quiz_responses WHERE document_id = ? ORDER BY id DESC",
        )
        .bind(document_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(responses)
    }
}
