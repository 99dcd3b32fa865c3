use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// 上传的文档（文章）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Document {
    pub id: i64,
    pub title: String,
    /// 提取出的正文，可能为空
    pub parsed_text: Option<String>,
    pub uploaded_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct PersistedQuestion {
    pub id: i64,
    pub document_id: i64,
    pub question_text: String,
    pub explanation: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct PersistedAnswer {
    pub id: i64,
    pub question_id: i64,
    pub choice_letter: String,
    pub choice_text: String,
    pub is_correct: bool,
}

/// 对外暴露的题目结构：题目 + 全部选项
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionWithAnswers {
    pub question: PersistedQuestion,
    pub answers: Vec<PersistedAnswer>,
}

/// 一次答题记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct QuizResponse {
    pub id: i64,
    pub document_id: i64,
    pub user_name: Option<String>,
    pub score: i64,
    pub total_questions: i64,
    pub submitted_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct UserAnswer {
    pub id: i64,
    pub response_id: i64,
    pub question_id: i64,
    pub selected_answer_id: i64,
    pub is_correct: bool,
}

/// 提交时用户对单题的选择
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedAnswer {
    pub question_id: i64,
    pub selected_answer_id: i64,
}

/// 答题提交
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuizSubmission {
    pub document_id: i64,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub answers: Vec<SelectedAnswer>,
}

/// 评分结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizResult {
    pub response_id: i64,
    pub score: i64,
    pub total_questions: i64,
    pub percentage: f64,
}
