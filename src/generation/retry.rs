use log::{info, warn};
use std::fmt::Display;

/// Instrucción que se añade al prompt en el segundo intento
pub const REPAIR_INSTRUCTION: &str =
    "IMPORTANT: 이전 응답이 JSON 파싱에 실패했습니다. 반드시 올바른 JSON 객체만 출력하세요.";

pub fn repair_prompt(prompt: &str) -> String {
    format!("{prompt}\n\n{REPAIR_INSTRUCTION}")
}

#[derive(Debug)]
pub struct Attempted<T> {
    pub value: T,
    /// 1 o 2
    pub attempts: u8,
    pub logs: Vec<String>,
}

#[derive(Debug)]
pub struct Exhausted<E> {
    pub first: E,
    pub last: E,
    pub logs: Vec<String>,
}

/// Ejecuta `attempt` con el prompt original y, si falla, exactamente una vez
/// más con `repair(prompt)`. Devuelve el primer éxito o ambos errores.
pub fn retry_once<T, E, A, R>(prompt: &str, repair: R, mut attempt: A) -> Result<Attempted<T>, Exhausted<E>>
where
    E: Display,
    A: FnMut(&str) -> Result<T, E>,
    R: FnOnce(&str) -> String,
{
    let mut logs = Vec::new();

    push(&mut logs, "1차 호출 시작".to_string(), false);
    let first = match attempt(prompt) {
        Ok(value) => {
            push(&mut logs, "1차 호출 성공".to_string(), false);
            return Ok(Attempted {
                value,
                attempts: 1,
                logs,
            });
        }
        Err(err) => err,
    };
    push(&mut logs, format!("1차 호출/파싱 실패: {first}"), true);

    push(&mut logs, "2차 재시도 시작".to_string(), false);
    let repaired = repair(prompt);
    match attempt(&repaired) {
        Ok(value) => {
            push(&mut logs, "2차 호출 성공".to_string(), false);
            Ok(Attempted {
                value,
                attempts: 2,
                logs,
            })
        }
        Err(last) => {
            push(&mut logs, format!("2차 호출/파싱 실패: {last}"), true);
            Err(Exhausted { first, last, logs })
        }
    }
}

fn push(logs: &mut Vec<String>, line: String, failed: bool) {
    if failed {
        warn!("{line}");
    } else {
        info!("{line}");
    }
    logs.push(line);
}
