use crate::model::{EvalResult, QuestionKind, QuizQuestion, clamp_level};

/// Compara la respuesta del alumno con la esperada según el tipo de pregunta
pub fn evaluate_answer(question: &QuizQuestion, user_answer: &str) -> EvalResult {
    let is_correct = match question.kind {
        QuestionKind::MultipleChoice => usize::try_from(question.answer_index)
            .ok()
            .and_then(|idx| question.choices.get(idx))
            .is_some_and(|expected| user_answer == expected),
        QuestionKind::FillBlank | QuestionKind::ShortAnswer => {
            let canonical = question
                .choices
                .first()
                .map(|c| c.trim().to_lowercase())
                .unwrap_or_default();
            // Una esperada vacía nunca puede acertarse
            !canonical.is_empty() && user_answer.trim().to_lowercase() == canonical
        }
    };

    EvalResult {
        is_correct,
        explanation: question.explanation.clone(),
        hint: question.hint.clone(),
    }
}

/// XP con el nivel vigente al responder, antes de ajustar la dificultad
pub fn xp_for_answer(is_correct: bool, level: u8) -> u32 {
    if is_correct {
        10 + 2 * u32::from(level)
    } else {
        2
    }
}

pub fn adjust_difficulty(current_level: u8, streak_correct: u32, streak_wrong: u32) -> u8 {
    let mut level = i64::from(current_level);
    if streak_correct >= 2 {
        level += 1;
    } else if streak_wrong >= 2 {
        level -= 1;
    }
    clamp_level(level)
}

/// Dificultad inicial a partir del diagnóstico (0..=3)
pub fn seed_difficulty(diagnostic_score: u32) -> u8 {
    clamp_level(i64::from(diagnostic_score) + 1)
}

pub fn badge_for_xp(xp: u32) -> &'static str {
    if xp >= 120 {
        "🏆 꾸준함 마스터"
    } else if xp >= 70 {
        "🥇 도전 배지"
    } else if xp >= 30 {
        "🌟 시작 배지"
    } else {
        "✨ 새싹 배지"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::sanitize_quiz_payload;
    use serde_json::json;

    fn question(kind: QuestionKind, choices: &[&str], answer_index: i64) -> QuizQuestion {
        QuizQuestion {
            id: "q1".into(),
            kind,
            question: "?".into(),
            choices: choices.iter().map(|c| c.to_string()).collect(),
            answer_index,
            hint: "힌트".into(),
            explanation: "해설".into(),
        }
    }

    #[test]
    fn multiple_choice_needs_exact_match() {
        let q = question(QuestionKind::MultipleChoice, &["am", "is", "are"], 0);
        assert!(evaluate_answer(&q, "am").is_correct);
        assert!(!evaluate_answer(&q, "Am").is_correct);
        assert!(!evaluate_answer(&q, " am").is_correct);
        assert!(!evaluate_answer(&q, "is").is_correct);
    }

    #[test]
    fn multiple_choice_out_of_range_is_always_wrong() {
        let q = question(QuestionKind::MultipleChoice, &["a", "b"], 5);
        for answer in ["a", "b", "", "5"] {
            assert!(!evaluate_answer(&q, answer).is_correct);
        }
        let negative = question(QuestionKind::MultipleChoice, &["a", "b"], -1);
        assert!(!evaluate_answer(&negative, "b").is_correct);
        let empty = question(QuestionKind::MultipleChoice, &[], 0);
        assert!(!evaluate_answer(&empty, "").is_correct);
    }

    #[test]
    fn sanitized_out_of_range_question_evaluates_incorrect() {
        let quiz = sanitize_quiz_payload(&json!({
            "level": 9,
            "questions": [{"type": "multiple_choice", "choices": ["a", "b"], "answer_index": 5}]
        }));
        assert_eq!(quiz.level, 5);
        let q = &quiz.questions[0];
        assert_eq!(q.answer_index, 5);
        assert!(!evaluate_answer(q, "a").is_correct);
        assert!(!evaluate_answer(q, "b").is_correct);
    }

    #[test]
    fn text_answers_ignore_case_and_padding() {
        let q = question(QuestionKind::FillBlank, &["Paris"], 0);
        assert!(evaluate_answer(&q, " paris ").is_correct);
        assert!(evaluate_answer(&q, "PARIS").is_correct);
        assert!(!evaluate_answer(&q, "London").is_correct);

        let short = question(QuestionKind::ShortAnswer, &["  사과 "], 0);
        assert!(evaluate_answer(&short, "사과").is_correct);
    }

    #[test]
    fn empty_expected_text_is_never_correct() {
        let q = question(QuestionKind::FillBlank, &[], 0);
        assert!(!evaluate_answer(&q, "").is_correct);
        let blank = question(QuestionKind::ShortAnswer, &["   "], 0);
        assert!(!evaluate_answer(&blank, "   ").is_correct);
    }

    #[test]
    fn result_copies_hint_and_explanation() {
        let q = question(QuestionKind::ShortAnswer, &["x"], 0);
        let result = evaluate_answer(&q, "y");
        assert_eq!(result.hint, "힌트");
        assert_eq!(result.explanation, "해설");
    }

    #[test]
    fn xp_rewards() {
        for level in 1..5u8 {
            assert!(xp_for_answer(true, level + 1) > xp_for_answer(true, level));
        }
        assert_eq!(xp_for_answer(true, 1), 12);
        assert_eq!(xp_for_answer(true, 5), 20);
        for level in 1..=5u8 {
            assert_eq!(xp_for_answer(false, level), 2);
        }
    }

    #[test]
    fn difficulty_moves_on_streaks() {
        assert_eq!(adjust_difficulty(3, 2, 0), 4);
        assert_eq!(adjust_difficulty(3, 0, 2), 2);
        assert_eq!(adjust_difficulty(5, 3, 0), 5);
        assert_eq!(adjust_difficulty(1, 0, 4), 1);
        assert_eq!(adjust_difficulty(3, 1, 0), 3);
    }

    #[test]
    fn difficulty_without_streak_is_idempotent_and_bounded() {
        for start in 0..=9u8 {
            let once = adjust_difficulty(start, 0, 0);
            assert_eq!(adjust_difficulty(once, 0, 0), once);
            for (c, w) in [(0, 0), (2, 0), (0, 2), (7, 7), (1, 1)] {
                let level = adjust_difficulty(start, c, w);
                assert!((1..=5).contains(&level));
            }
        }
    }

    #[test]
    fn diagnostic_seeding() {
        assert_eq!(seed_difficulty(0), 1);
        assert_eq!(seed_difficulty(3), 4);
        assert_eq!(seed_difficulty(10), 5);
    }

    #[test]
    fn badges_follow_xp_thresholds() {
        assert_eq!(badge_for_xp(0), "✨ 새싹 배지");
        assert_eq!(badge_for_xp(30), "🌟 시작 배지");
        assert_eq!(badge_for_xp(70), "🥇 도전 배지");
        assert_eq!(badge_for_xp(120), "🏆 꾸준함 마스터");
    }
}
