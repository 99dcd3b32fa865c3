use crate::error::{AppError, AppResult};
use std::path::Path;
use tokio::fs;

/// 从文本文件读取文章正文
pub async fn load_passage_file(path: &Path) -> AppResult<String> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;

    tracing::info!(
        "正在加载: {} ({} 字符)",
        path.file_name().unwrap_or_default().to_string_lossy(),
        content.chars().count()
    );

    Ok(content)
}

/// 以文件名（去掉扩展名）作为文档标题
pub fn title_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "Untitled".to_string())
}
