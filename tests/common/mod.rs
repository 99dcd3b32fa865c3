use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use futures::future::BoxFuture;
use passage_quiz::{Db, QuestionBackend, QuestionGenerator, QuizPipeline};

pub async fn create_test_db() -> Db {
    Db::connect("sqlite::memory:")
        .await
        .expect("failed to create test database")
}

/// 固定返回内容（或固定失败）的模型后端
pub struct ScriptedBackend {
    name: String,
    reply: Result<String, String>,
    pub calls: Arc<AtomicUsize>,
}

impl ScriptedBackend {
    pub fn ok(name: &str, reply: &str) -> Self {
        Self {
            name: name.to_string(),
            reply: Ok(reply.to_string()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            reply: Err(message.to_string()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl QuestionBackend for ScriptedBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn complete<'a>(&'a self, _prompt: &'a str) -> BoxFuture<'a, anyhow::Result<String>> {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(message) => Err(anyhow::anyhow!("{}", message)),
            }
        })
    }
}

pub fn pipeline(db: &Db, backends: Vec<ScriptedBackend>) -> QuizPipeline {
    let backends = backends
        .into_iter()
        .map(|b| Box::new(b) as Box<dyn QuestionBackend>)
        .collect();
    QuizPipeline::with_generator(db.clone(), QuestionGenerator::new(backends), 3000)
        .expect("failed to build pipeline")
}

/// 符合模板的模型输出，正确答案依次为 B、C、D、A ...
pub fn well_formed_reply(count: usize) -> String {
    let letters = ["A", "B", "C", "D"];
    let mut out = String::from("Here are the questions you asked for:\n\n");
    for n in 1..=count {
        out.push_str(&format!(
            "**{n}. What does paragraph {n} say?**\nA) First idea {n}\nB) Second idea {n}\nC) Third idea {n}\nD) Fourth idea {n}\nAnswer: {}\n\n",
            letters[n % 4]
        ));
    }
    out.push_str("Let me know if you need more!");
    out
}
