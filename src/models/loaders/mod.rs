pub mod passage_loader;

pub use passage_loader::{load_passage_file, title_from_path};
