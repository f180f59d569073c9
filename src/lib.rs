pub mod config;
pub mod diagnostic;
pub mod error;
pub mod generation;
pub mod model;
pub mod prompts;
pub mod scoring;
pub mod session;

pub use config::{GeminiConfig, KeyCheck, validate_api_key};
pub use error::{GenerationError, ParseError};
pub use generation::{GeneratedQuiz, generate_quiz};
pub use model::{EvalResult, QuestionKind, QuizQuestion, QuizSet};
pub use prompts::{QuizRequest, build_quiz_prompt};
pub use scoring::{adjust_difficulty, evaluate_answer, xp_for_answer};
pub use session::SessionState;
