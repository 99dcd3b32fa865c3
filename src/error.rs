use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// LLM 服务错误
    #[error("LLM错误: {0}")]
    Llm(#[from] LlmError),
    /// 数据库错误
    #[error("数据库错误: {0}")]
    Db(#[from] DbError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 其他错误（用于包装第三方库错误）
    #[error("错误: {0}")]
    Other(String),
}

/// LLM 服务错误
#[derive(Debug, Error)]
pub enum LlmError {
    /// API 调用失败
    #[error("LLM API调用失败 (模型: {model}): {source}")]
    ApiCallFailed {
        model: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 返回结果为空
    #[error("LLM返回结果为空 (模型: {model})")]
    EmptyResponse { model: String },
    /// 返回内容为空
    #[error("LLM返回内容为空 (模型: {model})")]
    EmptyContent { model: String },
}

/// 数据库错误
#[derive(Debug, Error)]
pub enum DbError {
    /// 查询或写入失败
    #[error("数据库操作失败: {0}")]
    Query(#[source] sqlx::Error),
    /// 记录不存在
    #[error("{entity} 不存在 (id: {id})")]
    NotFound { entity: &'static str, id: i64 },
    /// 文档下没有题目
    #[error("文档 {document_id} 没有题目")]
    NoQuestions { document_id: i64 },
    /// 同一题目提交了多个选项
    #[error("题目 {question_id} 重复作答")]
    DuplicateSelection { question_id: i64 },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 缺少必填项
    #[error("缺少配置项: {key}")]
    Missing { key: String },
}

// ========== 从常见错误类型转换 ==========

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Db(DbError::Query(err))
    }
}

impl From<regex::Error> for AppError {
    fn from(err: regex::Error) -> Self {
        AppError::Other(format!("正则表达式无效: {}", err))
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建记录不存在错误
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        AppError::Db(DbError::NotFound { entity, id })
    }

    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// 是否为记录不存在
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::Db(DbError::NotFound { .. }))
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
