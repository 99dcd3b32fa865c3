use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::error::{AppResult, ConfigError};

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    /// 首选模型
    pub primary_model: String,
    /// 首选模型失败后使用的备用模型
    pub fallback_model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    // --- 数据库配置 ---
    /// SQLite 连接串，例如 `sqlite://quiz.db?mode=rwc`
    pub database_url: String,
    /// 送入模型前文章最多保留的字符数
    pub max_passage_chars: usize,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm_api_key: String::new(),
            llm_api_base_url: "https://generativelanguage.googleapis.com/v1beta/openai".to_string(),
            primary_model: "gemini-2.0-flash-001".to_string(),
            fallback_model: "gemini-2.5-flash".to_string(),
            temperature: 0.3,
            max_tokens: 4096,
            database_url: "sqlite://passage_quiz.db?mode=rwc".to_string(),
            max_passage_chars: 3000,
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// 从 TOML 文件加载配置，缺省字段使用默认值，环境变量优先级最高
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("无法读取配置文件: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("无法解析配置文件: {}", path.display()))?;
        Ok(config.with_env_overrides())
    }

    fn with_env_overrides(self) -> Self {
        Self {
            llm_api_key: std::env::var("LLM_API_KEY").unwrap_or(self.llm_api_key),
            llm_api_base_url: std::env::var("LLM_API_BASE_URL").unwrap_or(self.llm_api_base_url),
            primary_model: std::env::var("PRIMARY_MODEL").unwrap_or(self.primary_model),
            fallback_model: std::env::var("FALLBACK_MODEL").unwrap_or(self.fallback_model),
            temperature: std::env::var("LLM_TEMPERATURE").ok().and_then(|v| v.parse().ok()).unwrap_or(self.temperature),
            max_tokens: std::env::var("LLM_MAX_TOKENS").ok().and_then(|v| v.parse().ok()).unwrap_or(self.max_tokens),
            database_url: std::env::var("DATABASE_URL").unwrap_or(self.database_url),
            max_passage_chars: std::env::var("MAX_PASSAGE_CHARS").ok().and_then(|v| v.parse().ok()).unwrap_or(self.max_passage_chars),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(self.verbose_logging),
        }
    }

    /// 检查必填项
    pub fn validate(&self) -> AppResult<()> {
        if self.database_url.trim().is_empty() {
            return Err(ConfigError::Missing {
                key: "DATABASE_URL".to_string(),
            }
            .into());
        }
        if self.primary_model.trim().is_empty() {
            return Err(ConfigError::Missing {
                key: "PRIMARY_MODEL".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// 按尝试顺序返回模型列表（首选在前），空的备用模型会被跳过
    pub fn model_chain(&self) -> Vec<String> {
        [&self.primary_model, &self.fallback_model]
            .into_iter()
            .filter(|m| !m.trim().is_empty())
            .cloned()
            .collect()
    }
}
