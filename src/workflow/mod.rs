pub mod upload_ctx;
pub mod upload_flow;

pub use upload_ctx::UploadCtx;
pub use upload_flow::{truncate_chars, ProcessResult, QuizPipeline, UploadOutcome};
