//! 上传处理上下文
//!
//! 封装"我正在处理哪篇文档"这一信息，只用于日志

use std::fmt::Display;

use crate::models::Document;

#[derive(Debug, Clone)]
pub struct UploadCtx {
    pub document_id: i64,
    pub title: String,
}

impl UploadCtx {
    pub fn new(document: &Document) -> Self {
        Self {
            document_id: document.id,
            title: document.title.clone(),
        }
    }
}

impl Display for UploadCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[文档 #{} {}]", self.document_id, self.title)
    }
}
