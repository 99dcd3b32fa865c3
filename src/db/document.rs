use super::Db;
use crate::error::{AppError, AppResult};
use crate::models::Document;

impl Db {
    /// 保存上传的文档，返回新文档
    pub async fn create_document(&self, title: &str, parsed_text: Option<&str>) -> AppResult<Document> {
        let document = sqlx::query_as::<_, Document>(
            "INSERT INTO documents (title, parsed_text) VALUES (?, ?) \
             RETURNING id, title, parsed_text, uploaded_at",
        )
        .bind(title)
        .bind(parsed_text)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!("📄 已创建文档 #{}", document.id);
        Ok(document)
    }

    pub async fn get_document(&self, document_id: i64) -> AppResult<Document> {
        sqlx::query_as::<_, Document>(
            "SELECT id, title, parsed_text, uploaded_at FROM documents WHERE id = ?",
        )
        .bind(document_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::not_found("document", document_id))
    }

    /// 按上传时间倒序列出文档
    pub async fn list_documents(&self) -> AppResult<Vec<Document>> {
        let documents = sqlx::query_as::<_, Document>(
            "SELECT id, title, parsed_text, uploaded_at FROM documents \
             ORDER BY uploaded_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(documents)
    }
}

#[cfg(test)]
mod tests {
    use crate::db::memory_db;

    #[tokio::test]
    async fn test_create_and_get_document() {
        let db = memory_db().await;
        let created = db.create_document("Volcanoes", Some("Lava is hot.")).await.unwrap();

        let fetched = db.get_document(created.id).await.unwrap();
        assert_eq!(fetched.title, "Volcanoes");
        assert_eq!(fetched.parsed_text.as_deref(), Some("Lava is hot."));
    }

    #[tokio::test]
    async fn test_get_missing_document() {
        let db = memory_db().await;
        let err = db.get_document(42).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_list_documents_newest_first() {
        let db = memory_db().await;
        let first = db.create_document("first", None).await.unwrap();
        let second = db.create_document("second", None).await.unwrap();

        let ids: Vec<i64> = db.list_documents().await.unwrap().iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }
}
