use sqlx::SqlitePool;

use crate::error::AppResult;

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS documents (
        id INTEGER PRIMARY KEY,
        title TEXT NOT NULL,
        parsed_text TEXT,
        uploaded_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS quiz_questions (
        id INTEGER PRIMARY KEY,
        document_id INTEGER NOT NULL,
        question_text TEXT NOT NULL,
        explanation TEXT,
        created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
        FOREIGN KEY(document_id) REFERENCES documents(id) ON DELETE CASCADE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS quiz_answers (
        id INTEGER PRIMARY KEY,
        question_id INTEGER NOT NULL,
        choice_letter TEXT NOT NULL CHECK (length(choice_letter) = 1),
        choice_text TEXT NOT NULL,
        is_correct BOOLEAN NOT NULL DEFAULT 0,
        FOREIGN KEY(question_id) REFERENCES quiz_questions(id) ON DELETE CASCADE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS quiz_responses (
        id INTEGER PRIMARY KEY,
        document_id INTEGER NOT NULL,
        user_name TEXT,
        score INTEGER NOT NULL,
        total_questions INTEGER NOT NULL,
        submitted_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
        FOREIGN KEY(document_id) REFERENCES documents(id) ON DELETE CASCADE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS user_answers (
        id INTEGER PRIMARY KEY,
        response_id INTEGER NOT NULL,
        question_id INTEGER NOT NULL,
        selected_answer_id INTEGER NOT NULL,
        is_correct BOOLEAN NOT NULL,
        FOREIGN KEY(response_id) REFERENCES quiz_responses(id) ON DELETE CASCADE,
        FOREIGN KEY(question_id) REFERENCES quiz_questions(id) ON DELETE CASCADE,
        FOREIGN KEY(selected_answer_id) REFERENCES quiz_answers(id) ON DELETE CASCADE
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_quiz_questions_document ON quiz_questions(document_id)",
    "CREATE INDEX IF NOT EXISTS idx_quiz_answers_question ON quiz_answers(question_id)",
];

pub async fn create_schema(pool: &SqlitePool) -> AppResult<()> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}
