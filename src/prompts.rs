// src/prompts.rs

use crate::model::{QuestionKind, clamp_level};
use serde::Serialize;
use serde_json::{Value, json};

pub const SYSTEM_INSTRUCTION: &str = r#"You are a warm and supportive tutor for low-achieving learners.
Rules:
1) Use easy vocabulary and short sentences.
2) Never blame, shame, or mock the student.
3) Always keep an encouraging tone.
4) Questions must be clear and choices must not be confusing.
5) Return output as valid JSON only (no markdown fences).
6) Follow this JSON schema exactly:
{
  "level": 1,
  "questions": [
    {
      "id": "q1",
      "type": "multiple_choice",
      "question": "...",
      "choices": ["A", "B", "C", "D"],
      "answer_index": 0,
      "hint": "...",
      "explanation": "..."
    }
  ],
  "encouragement": "..."
}
7) "type" must be one of: multiple_choice, fill_blank, short_answer.
8) For multiple_choice: include exactly 4 choices and a valid answer_index.
9) For fill_blank and short_answer: choices should be [] and answer_index should be 0."#;

pub const EMPTY_GRADE_PLACEHOLDER: &str = "미입력";
pub const EMPTY_MISTAKE_PLACEHOLDER: &str = "없음";

/// Plan fijo que usa la sesión: 5 preguntas, mayoría de opción múltiple
pub const DEFAULT_QUESTION_PLAN: [QuestionKind; 5] = [
    QuestionKind::MultipleChoice,
    QuestionKind::MultipleChoice,
    QuestionKind::FillBlank,
    QuestionKind::MultipleChoice,
    QuestionKind::ShortAnswer,
];

pub struct QuizRequest<'a> {
    pub subject: &'a str,
    pub grade: &'a str,
    pub level: i64,
    pub recent_wrong_pattern: &'a str,
    pub question_plan: &'a [QuestionKind],
    pub num_questions: usize,
}

// El orden de los campos es el orden en el JSON enviado
#[derive(Serialize)]
struct PromptPayload<'a> {
    task: &'static str,
    subject: &'a str,
    grade: &'a str,
    difficulty_level: u8,
    recent_wrong_pattern: &'a str,
    question_type_plan: &'a [QuestionKind],
    num_questions: usize,
    requirements: Requirements,
    output_schema: Value,
    important: &'static str,
}

#[derive(Serialize)]
struct Requirements {
    language: &'static str,
    question_sentence_length: &'static str,
    explanation_length: &'static str,
    if_wrong_provide_hint_without_direct_answer: bool,
    encouragement_style: &'static str,
}

impl Default for Requirements {
    fn default() -> Self {
        Self {
            language: "Korean",
            question_sentence_length: "short",
            explanation_length: "1~2 sentences",
            if_wrong_provide_hint_without_direct_answer: true,
            encouragement_style: "brief positive reinforcement",
        }
    }
}

fn output_schema() -> Value {
    json!({
        "level": "int 1~5",
        "questions": [
            {
                "id": "string",
                "type": "multiple_choice|fill_blank|short_answer",
                "question": "string",
                "choices": ["string"],
                "answer_index": "int",
                "hint": "string",
                "explanation": "string"
            }
        ],
        "encouragement": "string"
    })
}

/// Construye el prompt JSON para el modelo. No valida que el plan y
/// `num_questions` coincidan.
pub fn build_quiz_prompt(request: &QuizRequest<'_>) -> String {
    let payload = PromptPayload {
        task: "Create a game-like quiz set for a low-achieving learner.",
        subject: request.subject,
        grade: non_empty_or(request.grade, EMPTY_GRADE_PLACEHOLDER),
        difficulty_level: clamp_level(request.level),
        recent_wrong_pattern: non_empty_or(request.recent_wrong_pattern, EMPTY_MISTAKE_PLACEHOLDER),
        question_type_plan: request.question_plan,
        num_questions: request.num_questions,
        requirements: Requirements::default(),
        output_schema: output_schema(),
        important: "Return valid JSON only. No markdown. No extra keys.",
    };
    serde_json::to_string_pretty(&payload).expect("prompt payload only holds strings and numbers")
}

fn non_empty_or<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.is_empty() { placeholder } else { value }
}
