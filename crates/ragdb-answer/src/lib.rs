pub mod context;
pub mod generate;
pub mod openai;

pub use context::assemble;
pub use generate::{generate, AnswerMode};
pub use openai::OpenAiGenerator;
