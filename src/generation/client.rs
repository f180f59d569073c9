use super::gemini::{GeminiBackend, ModelBackend};
use super::parse::parse_model_text;
use super::retry::{repair_prompt, retry_once};
use super::sanitize::sanitize_quiz_payload;
use crate::config::GeminiConfig;
use crate::error::{AttemptError, BackendError, GenerationError};
use crate::model::QuizSet;
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct GeneratedQuiz {
    pub quiz: QuizSet,
    /// Registro de intentos, en orden
    pub logs: Vec<String>,
}

/// Genera un quiz con el backend real de Gemini
pub fn generate_quiz(api_key: &str, prompt: &str) -> Result<GeneratedQuiz, GenerationError> {
    let config = GeminiConfig::from_env();
    match GeminiBackend::new(api_key, config) {
        Ok(backend) => generate_quiz_with(&backend, prompt),
        Err(err) => {
            // Sin cliente HTTP los dos intentos fallan igual
            let failing = FailingBackend(err.to_string());
            generate_quiz_with(&failing, prompt)
        }
    }
}

/// Un intento = llamada + parseo + saneado. Como mucho dos intentos.
pub fn generate_quiz_with<B>(backend: &B, prompt: &str) -> Result<GeneratedQuiz, GenerationError>
where
    B: ModelBackend + ?Sized,
{
    let attempt = |p: &str| -> Result<QuizSet, AttemptError> {
        let raw = backend.generate(p)?;
        let map = parse_model_text(&raw)?;
        Ok(sanitize_quiz_payload(&Value::Object(map)))
    };

    match retry_once(prompt, repair_prompt, attempt) {
        Ok(done) => Ok(GeneratedQuiz {
            quiz: done.value,
            logs: done.logs,
        }),
        Err(exhausted) => Err(GenerationError::new(exhausted.logs)),
    }
}

struct FailingBackend(String);

impl ModelBackend for FailingBackend {
    fn generate(&self, _prompt: &str) -> Result<String, BackendError> {
        Err(BackendError::Client(self.0.clone()))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::GENERATION_FAILED_MESSAGE;
    use crate::model::QuestionKind;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// Backend de prueba que devuelve respuestas en orden
    pub(crate) struct ScriptedBackend {
        replies: RefCell<VecDeque<Result<String, BackendError>>>,
        pub prompts: RefCell<Vec<String>>,
    }

    impl ScriptedBackend {
        pub(crate) fn new(replies: Vec<Result<String, BackendError>>) -> Self {
            Self {
                replies: RefCell::new(replies.into()),
                prompts: RefCell::new(Vec::new()),
            }
        }

        pub(crate) fn ok(text: &str) -> Result<String, BackendError> {
            Ok(text.to_string())
        }

        pub(crate) fn quota() -> Result<String, BackendError> {
            Err(BackendError::Status {
                status: 429,
                body: "RESOURCE_EXHAUSTED".into(),
            })
        }
    }

    impl ModelBackend for ScriptedBackend {
        fn generate(&self, prompt: &str) -> Result<String, BackendError> {
            self.prompts.borrow_mut().push(prompt.to_string());
            self.replies
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(BackendError::Decode("no scripted reply".into())))
        }
    }

    const GOOD: &str = r#"```json
{"level": 2, "questions": [{"id": "q1", "type": "fill_blank", "question": "I ___ a student.", "choices": ["am"], "answer_index": 0, "hint": "be동사", "explanation": "I 다음에는 am"}], "encouragement": "최고예요!"}
```"#;

    #[test]
    fn first_attempt_success_returns_sanitized_quiz() {
        let backend = ScriptedBackend::new(vec![ScriptedBackend::ok(GOOD)]);
        let generated = generate_quiz_with(&backend, "prompt").expect("generated");
        assert_eq!(generated.quiz.level, 2);
        assert_eq!(generated.quiz.questions[0].kind, QuestionKind::FillBlank);
        assert_eq!(generated.quiz.encouragement, "최고예요!");
        assert_eq!(generated.logs, vec!["1차 호출 시작", "1차 호출 성공"]);
        assert_eq!(backend.prompts.borrow().len(), 1);
    }

    #[test]
    fn malformed_first_reply_triggers_repair_retry() {
        let backend = ScriptedBackend::new(vec![
            ScriptedBackend::ok("Sure! Here is your quiz:"),
            ScriptedBackend::ok(GOOD),
        ]);
        let generated = generate_quiz_with(&backend, "prompt").expect("generated");
        assert_eq!(generated.quiz.questions.len(), 1);

        let prompts = backend.prompts.borrow();
        assert_eq!(prompts.len(), 2);
        assert_eq!(prompts[0], "prompt");
        assert_eq!(prompts[1], repair_prompt("prompt"));
        assert!(generated.logs[1].starts_with("1차 호출/파싱 실패: invalid JSON"));
        assert_eq!(generated.logs.last().map(String::as_str), Some("2차 호출 성공"));
    }

    #[test]
    fn network_failure_is_retried_like_parse_failure() {
        let backend = ScriptedBackend::new(vec![ScriptedBackend::quota(), ScriptedBackend::ok(GOOD)]);
        let generated = generate_quiz_with(&backend, "prompt").expect("generated");
        assert!(generated.logs[1].contains("HTTP 429"));
    }

    #[test]
    fn two_failures_raise_the_friendly_error() {
        let backend = ScriptedBackend::new(vec![ScriptedBackend::quota(), ScriptedBackend::ok("")]);
        let err = generate_quiz_with(&backend, "prompt").expect_err("exhausted");
        assert_eq!(err.to_string(), GENERATION_FAILED_MESSAGE);
        assert_eq!(err.logs().len(), 4);
        assert_eq!(err.logs()[3], "2차 호출/파싱 실패: empty model response");
        assert_eq!(backend.prompts.borrow().len(), 2);
    }

    #[test]
    fn non_object_json_counts_as_failure() {
        let backend = ScriptedBackend::new(vec![
            ScriptedBackend::ok("[]"),
            ScriptedBackend::ok("{\"questions\": \"none\"}"),
        ]);
        let generated = generate_quiz_with(&backend, "p").expect("generated");
        assert!(generated.quiz.questions.is_empty());
        assert_eq!(generated.quiz.level, 1);
    }

    #[test]
    fn client_build_failure_still_goes_through_two_attempts() {
        let failing = FailingBackend("tls backend unavailable".into());
        let err = generate_quiz_with(&failing, "p").expect_err("exhausted");
        assert_eq!(err.logs().len(), 4);
        assert!(err.logs()[1].contains("tls backend unavailable"));
    }
}
