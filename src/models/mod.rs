pub mod document;
pub mod loaders;
pub mod question;

pub use document::{
    Document, PersistedAnswer, PersistedQuestion, QuestionWithAnswers, QuizResponse, QuizResult,
    QuizSubmission, SelectedAnswer, UserAnswer,
};
pub use loaders::{load_passage_file, title_from_path};
pub use question::{ChoiceLetter, GeneratedAnswer, GeneratedQuestion};
