use thiserror::Error;

/// Mensaje único que ve el alumno cuando se agotan los dos intentos
pub const GENERATION_FAILED_MESSAGE: &str = "모델 응답을 읽지 못했어요. 잠시 후 다시 시도해 주세요.";

/// Texto del modelo que no se puede convertir en un objeto JSON
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("empty model response")]
    Empty,

    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("expected a JSON object, got {0}")]
    NotAnObject(&'static str),
}

/// Fallos de la llamada al modelo (red, cuota, credencial, cuerpo ilegible)
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("could not build HTTP client: {0}")]
    Client(String),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("model endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("could not decode model response: {0}")]
    Decode(String),
}

/// Un intento fallido: la llamada o el parseo
#[derive(Error, Debug)]
pub enum AttemptError {
    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Ambos intentos agotados. Solo expone el mensaje amable y el registro.
#[derive(Error, Debug, Clone)]
#[error("{}", GENERATION_FAILED_MESSAGE)]
pub struct GenerationError {
    logs: Vec<String>,
}

impl GenerationError {
    pub fn new(logs: Vec<String>) -> Self {
        Self { logs }
    }

    pub fn logs(&self) -> &[String] {
        &self.logs
    }

    pub fn into_logs(self) -> Vec<String> {
        self.logs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_error_hides_underlying_cause() {
        let err = GenerationError::new(vec!["2차 호출/파싱 실패: HTTP 429".into()]);
        assert_eq!(err.to_string(), GENERATION_FAILED_MESSAGE);
        assert!(!err.to_string().contains("429"));
        assert_eq!(err.logs().len(), 1);
    }

    #[test]
    fn attempt_error_is_transparent() {
        let err: AttemptError = ParseError::Empty.into();
        assert_eq!(err.to_string(), "empty model response");

        let err: AttemptError = BackendError::Status {
            status: 403,
            body: "denied".into(),
        }
        .into();
        assert_eq!(err.to_string(), "model endpoint returned HTTP 403: denied");
    }
}
