use std::time::Duration;

pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_TEMPERATURE: f32 = 0.5;
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 1800;

pub const ENDPOINT_ENV: &str = "ADAPTIVE_QUIZ_GEMINI_ENDPOINT";
pub const MODEL_ENV: &str = "ADAPTIVE_QUIZ_MODEL";
pub const TIMEOUT_ENV: &str = "ADAPTIVE_QUIZ_TIMEOUT_SECS";
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

const MIN_API_KEY_CHARS: usize = 20;

#[derive(Debug, Clone, PartialEq)]
pub struct GeminiConfig {
    pub endpoint: String,
    pub model: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    /// Sin límite por defecto; el host puede imponer uno
    pub timeout: Option<Duration>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_GEMINI_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            timeout: None,
        }
    }
}

impl GeminiConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Igual que `from_env` pero con una fuente de variables inyectable
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = Self::default();
        if let Some(endpoint) = non_blank(ENDPOINT_ENV) {
            config.endpoint = endpoint.trim_end_matches('/').to_string();
        }
        if let Some(model) = non_blank(MODEL_ENV) {
            config.model = model;
        }
        if let Some(secs) = non_blank(TIMEOUT_ENV).and_then(|v| v.parse::<u64>().ok()) {
            config.timeout = Some(Duration::from_secs(secs));
        }
        config
    }

    pub fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyCheck {
    pub ok: bool,
    pub message: &'static str,
}

/// Comprobación de formato, no verifica la clave contra el servicio
pub fn validate_api_key(key: &str) -> KeyCheck {
    if key.is_empty() {
        return KeyCheck {
            ok: false,
            message: "API Key를 입력해 주세요.",
        };
    }
    if key.trim().chars().count() < MIN_API_KEY_CHARS {
        return KeyCheck {
            ok: false,
            message: "API Key가 너무 짧아요. 키를 다시 확인해 주세요.",
        };
    }
    KeyCheck {
        ok: true,
        message: "사용 가능한 형식입니다.",
    }
}
