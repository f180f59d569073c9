// src/diagnostic.rs

use crate::scoring::seed_difficulty;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DiagnosticItem {
    pub prompt: String,
    pub choices: Vec<String>,
    pub answer: String,
}

/// Carga las preguntas del diagnóstico desde el YAML embebido
pub fn read_diagnostic_embedded() -> Result<Vec<DiagnosticItem>, serde_yaml::Error> {
    let file_content = include_str!("data/diagnostic.yaml");
    serde_yaml::from_str(file_content)
}

/// Aciertos exactos; las respuestas que faltan cuentan como fallo
pub fn score_diagnostic<S: AsRef<str>>(items: &[DiagnosticItem], picks: &[S]) -> u32 {
    items
        .iter()
        .zip(picks)
        .filter(|(item, pick)| {
            let pick: &str = pick.as_ref();
            item.answer == pick
        })
        .count() as u32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagnosticOutcome {
    pub score: u32,
    pub difficulty: u8,
}

pub fn run_diagnostic<S: AsRef<str>>(items: &[DiagnosticItem], picks: &[S]) -> DiagnosticOutcome {
    let score = score_diagnostic(items, picks);
    DiagnosticOutcome {
        score,
        difficulty: seed_difficulty(score),
    }
}
