use serde::{Deserialize, Serialize};

pub const MIN_LEVEL: u8 = 1;
pub const MAX_LEVEL: u8 = 5;

/// Lleva cualquier entero al rango de niveles válido
pub fn clamp_level(level: i64) -> u8 {
    level.clamp(MIN_LEVEL as i64, MAX_LEVEL as i64) as u8
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    MultipleChoice,
    FillBlank,
    ShortAnswer,
}

impl QuestionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionKind::MultipleChoice => "multiple_choice",
            QuestionKind::FillBlank => "fill_blank",
            QuestionKind::ShortAnswer => "short_answer",
        }
    }

    pub fn from_wire(value: &str) -> Option<Self> {
        match value.trim() {
            "multiple_choice" => Some(QuestionKind::MultipleChoice),
            "fill_blank" => Some(QuestionKind::FillBlank),
            "short_answer" => Some(QuestionKind::ShortAnswer),
            _ => None,
        }
    }
}

impl Default for QuestionKind {
    fn default() -> Self {
        QuestionKind::MultipleChoice
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct QuizQuestion {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    pub question: String,
    #[serde(default)]
    pub choices: Vec<String>,
    // Puede quedar fuera de rango; se rechaza al evaluar
    #[serde(default)]
    pub answer_index: i64,
    pub hint: String,
    pub explanation: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct QuizSet {
    pub level: u8,
    pub questions: Vec<QuizQuestion>,
    pub encouragement: String,
}

impl QuizSet {
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvalResult {
    pub is_correct: bool,
    pub explanation: String,
    pub hint: String,
}
