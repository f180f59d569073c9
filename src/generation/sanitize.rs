use crate::model::{QuestionKind, QuizQuestion, QuizSet, clamp_level};
use serde_json::{Map, Value};

pub const DEFAULT_QUESTION: &str = "문제가 준비 중이에요.";
pub const DEFAULT_HINT: &str = "핵심 단어를 다시 살펴보세요.";
pub const DEFAULT_EXPLANATION: &str = "좋아요! 한 번 더 확인해봐요.";
pub const DEFAULT_ENCOURAGEMENT: &str = "잘하고 있어요! 계속 도전해봐요!";

/// Normaliza cualquier JSON decodificado a un `QuizSet` completo.
///
/// Nunca falla: cada campo inválido se sustituye por su valor por defecto
/// de forma independiente. Los `answer_index` fuera de rango se conservan;
/// la evaluación los trata como incorrectos.
pub fn sanitize_quiz_payload(payload: &Value) -> QuizSet {
    let empty = Map::new();
    let payload = payload.as_object().unwrap_or(&empty);

    let level = payload.get("level").and_then(coerce_int).unwrap_or(1);

    let questions = match payload.get("questions") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_object)
            .enumerate()
            .map(|(i, q)| sanitize_question(i + 1, q))
            .collect(),
        _ => Vec::new(),
    };

    QuizSet {
        level: clamp_level(level),
        questions,
        encouragement: text_or(payload.get("encouragement"), DEFAULT_ENCOURAGEMENT),
    }
}

/// `position` es 1-based entre los elementos conservados
fn sanitize_question(position: usize, q: &Map<String, Value>) -> QuizQuestion {
    let kind = match q.get("type") {
        Some(Value::String(s)) => {
            QuestionKind::from_wire(s).unwrap_or(QuestionKind::ShortAnswer)
        }
        _ => QuestionKind::MultipleChoice,
    };

    let choices = match q.get("choices") {
        Some(Value::Array(items)) => items.iter().map(choice_text).collect(),
        _ => Vec::new(),
    };

    QuizQuestion {
        id: text_or(q.get("id"), &format!("q{position}")),
        kind,
        question: text_or(q.get("question"), DEFAULT_QUESTION),
        choices,
        answer_index: q.get("answer_index").and_then(coerce_int).unwrap_or(0),
        hint: text_or(q.get("hint"), DEFAULT_HINT),
        explanation: text_or(q.get("explanation"), DEFAULT_EXPLANATION),
    }
}

fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::Bool(b) => Some(i64::from(*b)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

fn coerce_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn text_or(value: Option<&Value>, default: &str) -> String {
    value
        .and_then(coerce_text)
        .unwrap_or_else(|| default.to_string())
}

// Las opciones nunca se descartan para no desplazar answer_index
fn choice_text(value: &Value) -> String {
    coerce_text(value).unwrap_or_else(|| value.to_string())
}
