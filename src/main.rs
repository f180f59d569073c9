use adaptive_quiz::config::{API_KEY_ENV, GeminiConfig, validate_api_key};
use adaptive_quiz::diagnostic::{read_diagnostic_embedded, score_diagnostic};
use adaptive_quiz::error::GENERATION_FAILED_MESSAGE;
use adaptive_quiz::generation::GeminiBackend;
use adaptive_quiz::model::{QuestionKind, QuizQuestion};
use adaptive_quiz::session::{GRADES, SUBJECTS, SessionState};
use std::io::{self, BufRead, Write};

type AppResult<T> = Result<T, Box<dyn std::error::Error>>;

fn main() -> AppResult<()> {
    pretty_env_logger::init();

    let stdin = io::stdin();
    let mut input = stdin.lock();

    println!("🎯 성적이 낮은 학생을 위한 재미있는 학습 사이트");
    println!("짧게 배우고, 바로 칭찬받고, 다시 도전해요!\n");

    let api_key = match std::env::var(API_KEY_ENV).ok().filter(|k| !k.trim().is_empty()) {
        Some(key) => key,
        None => ask(&mut input, "Gemini API Key: ")?.unwrap_or_default(),
    };
    let key_check = validate_api_key(&api_key);
    println!("{}", key_check.message);
    if !key_check.ok {
        println!("API Key가 없으면 퀴즈 생성/피드백 기능을 사용할 수 없어요.");
        return Ok(());
    }

    let mut session = SessionState::default();
    let subject = pick(&mut input, "과목 선택", &SUBJECTS)?.unwrap_or(SUBJECTS[0]);
    let grade = pick(&mut input, "학년(선택)", &GRADES)?.unwrap_or("");
    session.select(subject, grade);

    // 1) Diagnóstico
    println!("\n1) 가벼운 진단 (3문항)");
    let items = read_diagnostic_embedded()?;
    let mut picks = Vec::with_capacity(items.len());
    for (idx, item) in items.iter().enumerate() {
        let choices: Vec<&str> = item.choices.iter().map(String::as_str).collect();
        let label = format!("Q{}. {}", idx + 1, item.prompt);
        picks.push(pick(&mut input, &label, &choices)?.unwrap_or("").to_string());
    }
    let outcome = session.complete_diagnostic(score_diagnostic(&items, &picks));
    println!(
        "진단 완료! 현재 추천 난이도는 {} 단계예요.",
        outcome.difficulty
    );

    if !session.can_generate(key_check.ok) {
        return Ok(());
    }

    let backend = match GeminiBackend::new(&api_key, GeminiConfig::from_env()) {
        Ok(backend) => backend,
        Err(err) => {
            log::error!("no se pudo crear el cliente HTTP: {err}");
            println!("{GENERATION_FAILED_MESSAGE}");
            return Ok(());
        }
    };

    // 2) Bucle de quizzes
    loop {
        println!("\n2) 퀴즈 생성 중...");
        if let Err(err) = session.request_quiz(&backend) {
            println!("{err}");
            print_logs(&session);
            return Ok(());
        }
        println!("퀴즈 생성 완료! 시작해볼까요?");

        let total = session.quiz.as_ref().map(|q| q.len()).unwrap_or(0);
        if total == 0 {
            println!("생성된 문제가 없어요. 다시 생성해 주세요.");
            session.request_new_quiz();
            continue;
        }

        while let Some(question) = session.current_question().cloned() {
            println!(
                "\n게임형 퀴즈 {}/{}",
                session.current_index + 1,
                total
            );
            let Some(answer) = ask_answer(&mut input, &question)? else {
                return Ok(());
            };
            let Some(feedback) = session.submit_answer(&answer) else {
                break;
            };
            if feedback.result.is_correct {
                println!("정답! 정말 잘했어요! 👏");
            } else {
                println!("아쉬워요. 다시 도전해볼까요?");
                println!("힌트: {}", feedback.result.hint);
            }
            println!("해설: {}", feedback.result.explanation);
            println!("+{} XP 획득!", feedback.xp_gained);
            println!("현재 난이도: {} 단계", feedback.difficulty);
        }

        println!("\n학습 완료! 정말 잘했어요! 🎉");
        println!("점수: {}/{}", session.score, total);
        println!("XP: {}", session.xp);
        println!("배지: {}", session.badge());
        println!(
            "{}",
            session
                .encouragement()
                .unwrap_or("좋아요! 내일 또 5문항 도전해요.")
        );
        print_logs(&session);

        match ask(&mut input, "새 퀴즈 받기? (y/n): ")? {
            Some(reply) if reply.trim().eq_ignore_ascii_case("y") => session.request_new_quiz(),
            _ => return Ok(()),
        }
    }
}

/// Lee una línea; `None` en fin de entrada
fn ask(input: &mut impl BufRead, label: &str) -> AppResult<Option<String>> {
    print!("{label}");
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

/// Menú numerado; línea vacía o número inválido devuelve `None`
fn pick<'a>(input: &mut impl BufRead, label: &str, options: &[&'a str]) -> AppResult<Option<&'a str>> {
    println!("{label}");
    for (i, option) in options.iter().enumerate() {
        let shown = if option.is_empty() { "-" } else { option };
        println!("  {}) {}", i + 1, shown);
    }
    let reply = ask(input, "> ")?.unwrap_or_default();
    Ok(reply
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| options.get(i).copied()))
}

fn ask_answer(input: &mut impl BufRead, question: &QuizQuestion) -> AppResult<Option<String>> {
    println!("{}", question.question);
    match question.kind {
        QuestionKind::MultipleChoice => {
            let choices: Vec<&str> = question.choices.iter().map(String::as_str).collect();
            println!("정답 선택");
            for (i, choice) in choices.iter().enumerate() {
                println!("  {}) {}", i + 1, choice);
            }
            let Some(reply) = ask(input, "> ")? else {
                return Ok(None);
            };
            // Número de opción o el texto de la opción
            let chosen = reply
                .trim()
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| choices.get(i).copied())
                .map(str::to_string)
                .unwrap_or(reply);
            Ok(Some(chosen))
        }
        QuestionKind::FillBlank => ask(input, "빈칸에 들어갈 말을 입력하세요: "),
        QuestionKind::ShortAnswer => ask(input, "짧게 답해보세요: "),
    }
}

fn print_logs(session: &SessionState) {
    if session.logs.is_empty() {
        return;
    }
    println!("\n디버그 로그");
    for line in &session.logs {
        println!("- {line}");
    }
}
