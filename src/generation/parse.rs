use crate::error::ParseError;
use serde_json::{Map, Value};

/// Quita las vallas de código que a veces añade el modelo
pub fn strip_code_fence(raw_text: &str) -> &str {
    let text = raw_text.trim();
    if !text.starts_with("```") {
        return text;
    }
    let inner = text.trim_matches('`');
    // Etiqueta de lenguaje en la primera línea (```json), solo una vez
    let inner = match inner.split_once('\n') {
        Some((first, rest)) if is_language_tag(first) => rest,
        _ => inner,
    };
    inner.trim()
}

fn is_language_tag(line: &str) -> bool {
    let tag = line.trim();
    !tag.is_empty()
        && tag
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+'))
}

/// Convierte la respuesta cruda en un objeto JSON o falla con `ParseError`
pub fn parse_model_text(raw_text: &str) -> Result<Map<String, Value>, ParseError> {
    let text = strip_code_fence(raw_text);
    if text.is_empty() {
        return Err(ParseError::Empty);
    }
    match serde_json::from_str::<Value>(text)? {
        Value::Object(map) => Ok(map),
        other => Err(ParseError::NotAnObject(json_kind(&other))),
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
