pub mod grading_service;
pub mod llm_service;
pub mod persistence_writer;
pub mod question_generator;
pub mod response_parser;

pub use grading_service::GradingService;
pub use llm_service::LlmService;
pub use persistence_writer::PersistenceWriter;
pub use question_generator::{QuestionBackend, QuestionGenerator, GENERATION_FAILED_SENTINEL};
pub use response_parser::ResponseParser;
