pub mod client;
pub mod gemini;
pub mod parse;
pub mod retry;
pub mod sanitize;

pub use client::{GeneratedQuiz, generate_quiz, generate_quiz_with};
pub use gemini::{GeminiBackend, ModelBackend};
pub use parse::parse_model_text;
pub use retry::{repair_prompt, retry_once};
pub use sanitize::sanitize_quiz_payload;
