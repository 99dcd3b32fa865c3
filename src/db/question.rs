use sqlx::SqliteConnection;

use super::Db;
use crate::error::{AppError, AppResult};
use crate::models::{GeneratedAnswer, PersistedAnswer, PersistedQuestion, QuestionWithAnswers};

/// 在给定连接（通常是事务）中插入一道题，返回题目 id
pub async fn insert_question(
    conn: &mut SqliteConnection,
    document_id: i64,
    question_text: &str,
) -> AppResult<i64> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO quiz_questions (document_id, question_text, explanation) \
         VALUES (?, ?, '') RETURNING id",
    )
    .bind(document_id)
    .bind(question_text)
    .fetch_one(&mut *conn)
    .await?;
    Ok(id)
}

/// 在给定连接中插入一个选项
pub async fn insert_answer(
    conn: &mut SqliteConnection,
    question_id: i64,
    answer: &GeneratedAnswer,
) -> AppResult<i64> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO quiz_answers (question_id, choice_letter, choice_text, is_correct) \
         VALUES (?, ?, ?, ?) RETURNING id",
    )
    .bind(question_id)
    .bind(answer.choice_letter.as_str())
    .bind(&answer.choice_text)
    .bind(answer.is_correct)
    .fetch_one(&mut *conn)
    .await?;
    Ok(id)
}

impl Db {
    /// 按生成顺序返回文档的全部题目及选项
    pub async fn questions_for_document(&self, document_id: i64) -> AppResult<Vec<QuestionWithAnswers>> {
        let questions = sqlx::query_as::<_, PersistedQuestion>(
            "SELECT id, document_id, question_text, explanation, created_at \
             FROM quiz_questions WHERE document_id = ? ORDER BY id",
        )
        .bind(document_id)
        .fetch_all(&self.pool)
        .await?;

        let mut result = Vec::with_capacity(questions.len());
        for question in questions {
            let answers = sqlx::query_as::<_, PersistedAnswer>(
                "SELECT id, question_id, choice_letter, choice_text, is_correct \
                 FROM quiz_answers WHERE question_id = ? ORDER BY choice_letter, id",
            )
            .bind(question.id)
            .fetch_all(&self.pool)
            .await?;
            result.push(QuestionWithAnswers { question, answers });
        }

        Ok(result)
    }

    pub async fn questions_count(&self, document_id: i64) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM quiz_questions WHERE document_id = ?")
            .bind(document_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// 文档下所有题目的选项总数
    pub async fn answers_count(&self, document_id: i64) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM quiz_answers a \
             JOIN quiz_questions q ON a.question_id = q.id \
             WHERE q.document_id = ?",
        )
        .bind(document_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    pub async fn get_question(&self, question_id: i64) -> AppResult<PersistedQuestion> {
        sqlx::query_as::<_, PersistedQuestion>(
            "SELECT id, document_id, question_text, explanation, created_at \
             FROM quiz_questions WHERE id = ?",
        )
        .bind(question_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::not_found("question", question_id))
    }

    pub async fn get_answer(&self, answer_id: i64) -> AppResult<PersistedAnswer> {
        sqlx::query_as::<_, PersistedAnswer>(
            "SELECT id, question_id, choice_letter, choice_text, is_correct \
             FROM quiz_answers WHERE id = ?",
        )
        .bind(answer_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::not_found("answer", answer_id))
    }
}
