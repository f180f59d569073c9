use crate::diagnostic::DiagnosticOutcome;
use crate::error::GenerationError;
use crate::generation::{ModelBackend, generate_quiz_with};
use crate::model::{EvalResult, QuizQuestion, QuizSet, clamp_level};
use crate::prompts::{DEFAULT_QUESTION_PLAN, QuizRequest, build_quiz_prompt};
use crate::scoring::{adjust_difficulty, badge_for_xp, evaluate_answer, seed_difficulty, xp_for_answer};
use log::info;
use serde::{Deserialize, Serialize};

pub const SUBJECTS: [&str; 4] = ["영어(기초)", "수학(기초)", "국어(기초)", "과학(기초)"];
pub const GRADES: [&str; 6] = ["", "초5", "초6", "중1", "중2", "중3"];
pub const QUESTIONS_PER_QUIZ: usize = 5;

/// Estado de un alumno. Lo posee el host y lo pasa por referencia.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SessionState {
    pub subject: String,
    pub grade: String,
    pub difficulty: u8,
    pub diagnostic_done: bool,
    pub diagnostic_score: u32,
    pub quiz: Option<QuizSet>,
    pub current_index: usize,
    pub score: u32,
    pub xp: u32,
    pub streak_correct: u32,
    pub streak_wrong: u32,
    // Última pregunta fallada, se manda al prompt
    pub recent_wrong_pattern: String,
    pub logs: Vec<String>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            subject: SUBJECTS[0].to_string(),
            grade: String::new(),
            difficulty: 1,
            diagnostic_done: false,
            diagnostic_score: 0,
            quiz: None,
            current_index: 0,
            score: 0,
            xp: 0,
            streak_correct: 0,
            streak_wrong: 0,
            recent_wrong_pattern: String::new(),
            logs: Vec::new(),
        }
    }
}

/// Lo que el host muestra tras enviar una respuesta
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerFeedback {
    pub result: EvalResult,
    pub xp_gained: u32,
    pub difficulty: u8,
}

impl SessionState {
    pub fn select(&mut self, subject: &str, grade: &str) {
        self.subject = subject.to_string();
        self.grade = grade.to_string();
    }

    pub fn complete_diagnostic(&mut self, score: u32) -> DiagnosticOutcome {
        self.diagnostic_done = true;
        self.diagnostic_score = score;
        self.difficulty = seed_difficulty(score);
        DiagnosticOutcome {
            score,
            difficulty: self.difficulty,
        }
    }

    /// Solo se genera con clave válida y diagnóstico hecho
    pub fn can_generate(&self, key_ok: bool) -> bool {
        key_ok && self.diagnostic_done
    }

    pub fn build_prompt(&self) -> String {
        build_quiz_prompt(&QuizRequest {
            subject: &self.subject,
            grade: &self.grade,
            level: i64::from(self.difficulty),
            recent_wrong_pattern: &self.recent_wrong_pattern,
            question_plan: &DEFAULT_QUESTION_PLAN,
            num_questions: QUESTIONS_PER_QUIZ,
        })
    }

    /// Pide un quiz nuevo. Si falla se guarda el registro y el quiz anterior
    /// no se toca.
    pub fn request_quiz<B>(&mut self, backend: &B) -> Result<(), GenerationError>
    where
        B: ModelBackend + ?Sized,
    {
        let prompt = self.build_prompt();
        match generate_quiz_with(backend, &prompt) {
            Ok(generated) => {
                self.install_quiz(generated.quiz, generated.logs);
                Ok(())
            }
            Err(err) => {
                self.logs = err.logs().to_vec();
                Err(err)
            }
        }
    }

    pub fn install_quiz(&mut self, quiz: QuizSet, logs: Vec<String>) {
        info!(
            "quiz instalado: {} preguntas, nivel {}",
            quiz.questions.len(),
            quiz.level
        );
        self.quiz = Some(quiz);
        self.current_index = 0;
        self.logs = logs;
    }

    pub fn current_question(&self) -> Option<&QuizQuestion> {
        self.quiz
            .as_ref()
            .and_then(|quiz| quiz.questions.get(self.current_index))
    }

    /// Hay quiz y ya no quedan preguntas
    pub fn is_complete(&self) -> bool {
        self.quiz
            .as_ref()
            .is_some_and(|quiz| !quiz.is_empty() && self.current_index >= quiz.len())
    }

    /// Evalúa la pregunta actual y actualiza rachas, XP y dificultad.
    /// `None` si no hay pregunta activa.
    pub fn submit_answer(&mut self, answer: &str) -> Option<AnswerFeedback> {
        let question = self.current_question()?.clone();
        let result = evaluate_answer(&question, answer);

        if result.is_correct {
            self.score += 1;
            self.streak_correct += 1;
            self.streak_wrong = 0;
        } else {
            self.streak_wrong += 1;
            self.streak_correct = 0;
            self.recent_wrong_pattern = question.question.clone();
        }

        // XP con el nivel anterior al ajuste
        let xp_gained = xp_for_answer(result.is_correct, self.difficulty);
        self.xp += xp_gained;

        self.difficulty = adjust_difficulty(
            clamp_level(i64::from(self.difficulty)),
            self.streak_correct,
            self.streak_wrong,
        );
        self.current_index += 1;

        Some(AnswerFeedback {
            result,
            xp_gained,
            difficulty: self.difficulty,
        })
    }

    /// Descarta el quiz terminado; XP, rachas y dificultad se conservan
    pub fn request_new_quiz(&mut self) {
        self.quiz = None;
        self.score = 0;
        self.current_index = 0;
    }

    pub fn badge(&self) -> &'static str {
        badge_for_xp(self.xp)
    }

    pub fn encouragement(&self) -> Option<&str> {
        self.quiz.as_ref().map(|quiz| quiz.encouragement.as_str())
    }
}
