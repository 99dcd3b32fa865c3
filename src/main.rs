use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use passage_quiz::models::{load_passage_file, title_from_path};
use passage_quiz::utils::logging;
use passage_quiz::{Config, Db, QuizPipeline};

const USAGE: &str = "用法: passage_quiz <passage.txt> [title]";

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置（PASSAGE_QUIZ_CONFIG 指向 TOML 文件时优先使用）
    let config = match std::env::var("PASSAGE_QUIZ_CONFIG") {
        Ok(path) => Config::from_toml_file(Path::new(&path))?,
        Err(_) => Config::from_env(),
    };
    config.validate()?;

    // 初始化日志
    logging::init(config.verbose_logging);
    logging::log_startup(&config);

    let mut args = std::env::args().skip(1);
    let passage_path = args.next().map(PathBuf::from).context(USAGE)?;
    let title = args.next().unwrap_or_else(|| title_from_path(&passage_path));

    let passage = load_passage_file(&passage_path).await?;

    let db = Db::connect(&config.database_url).await?;
    let pipeline = QuizPipeline::new(&config, db.clone())?;

    let outcome = pipeline.process_upload(&title, Some(&passage)).await?;
    logging::log_upload_outcome(&outcome);

    let questions = db.questions_for_document(outcome.document.id).await?;
    println!("{}", serde_json::to_string_pretty(&questions)?);

    Ok(())
}
