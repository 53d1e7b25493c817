//! Quiz command: read a course, answer its questions, record the result

use super::{fail, open_business, open_session, resolve_employee, CommandResult};
use relevate::config::Config;
use relevate::info;
use relevate::models::Course;
use relevate::quiz::{LessonProgress, LessonStep, QuizOutcome, QuizSession, QuizStep, PASS_THRESHOLD};
use std::io::{self, BufRead, Write};

/// Options for one quiz run
pub struct QuizArgs<'a> {
    /// Course id
    pub course_id: &'a str,
    /// Employee taking the quiz; the signed-in employee when `None`
    pub employee: Option<&'a str>,
    /// 1-based answers; asked interactively when `None`
    pub answers: Option<&'a [usize]>,
    /// Page through the lesson first
    pub read: bool,
}

/// Take a quiz and store the completion
pub fn run(args: &QuizArgs<'_>, config: &Config, verbose: bool) -> CommandResult {
    let mut business = open_business(config)?;
    let session = open_session(config);

    let employee = resolve_employee(&business, &session, args.employee)?;
    let employee_id = employee.id.clone();
    let employee_name = employee.name.clone();

    let outcome = {
        let course = business
            .catalog()
            .get(args.course_id)
            .ok_or_else(|| format!("✗ Course not found: '{}'", args.course_id))?;

        let stdin = io::stdin();
        let mut input = stdin.lock();
        if args.read {
            read_lesson(course, &mut input)?;
        }

        let mut quiz = QuizSession::new(course).map_err(fail)?;
        match args.answers {
            Some(answers) => {
                let zero_based = answers
                    .iter()
                    .map(|&n| n.checked_sub(1).ok_or("✗ Answers are numbered from 1"))
                    .collect::<Result<Vec<_>, _>>()?;
                quiz.answer_all(&zero_based).map_err(fail)?;
            }
            None => {
                if !ask_questions(&mut quiz, &mut input)? {
                    println!("✗ Quiz abandoned; nothing recorded");
                    return Ok(());
                }
            }
        }

        let outcome = quiz.submit().map_err(fail)?;
        if verbose {
            print_review(&quiz);
        }
        outcome
    };

    let record = business
        .record_quiz_result(&employee_id, &outcome)
        .map_err(fail)?;
    info!("Recorded {} for {}", record.id, employee_id);
    print_outcome(&employee_name, &outcome, record.certificate_id.as_deref());
    Ok(())
}

fn read_line(input: &mut impl BufRead) -> Result<Option<String>, String> {
    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .map_err(|e| format!("✗ Failed to read input: {e}"))?;
    Ok((read > 0).then(|| line.trim().to_string()))
}

fn prompt(text: &str) {
    print!("{text}");
    io::stdout().flush().ok();
}

fn read_lesson(course: &Course, input: &mut impl BufRead) -> CommandResult {
    let mut lesson = LessonProgress::new(course);
    while let Some(page) = lesson.current_page() {
        println!(
            "\n--- Lesson {} of {} ({}%): {} ---\n",
            lesson.page_index() + 1,
            course.page_count(),
            lesson.percent_complete(),
            page.title
        );
        println!("{}", page.content);

        prompt("\n[Enter] next, [b] back: ");
        match read_line(input)?.as_deref() {
            None => break,
            Some("b") => {
                lesson.previous();
            }
            Some(_) => {
                if lesson.next() == LessonStep::StartQuiz {
                    break;
                }
            }
        }
    }
    Ok(())
}

/// Ask each question on stdin. Returns `false` if the learner quits.
fn ask_questions(quiz: &mut QuizSession<'_>, input: &mut impl BufRead) -> Result<bool, String> {
    loop {
        let question = quiz.current_question();
        println!(
            "\nQuestion {} of {}: {}",
            quiz.current_index() + 1,
            quiz.question_count(),
            question.question
        );
        for (i, option) in question.options.iter().enumerate() {
            let marker = if quiz.answer(quiz.current_index()) == Some(i) { "*" } else { " " };
            println!(" {marker}{}. {option}", i + 1);
        }

        prompt("Answer (number), [b] back, [q] quit: ");
        let Some(line) = read_line(input)? else {
            return Ok(false);
        };
        match line.as_str() {
            "q" => return Ok(false),
            "b" => {
                if !quiz.previous() {
                    println!("Already at the first question.");
                }
            }
            "" if quiz.answer(quiz.current_index()).is_some() => {
                if quiz.next().map_err(fail)? == QuizStep::Finished {
                    return Ok(true);
                }
            }
            other => match other.parse::<usize>().ok().and_then(|n| n.checked_sub(1)) {
                Some(option) => match quiz.select_answer(option) {
                    Ok(()) => {
                        if quiz.next().map_err(fail)? == QuizStep::Finished {
                            return Ok(true);
                        }
                    }
                    Err(e) => println!("✗ {e}"),
                },
                None => println!("✗ Enter an option number"),
            },
        }
    }
}

fn print_review(quiz: &QuizSession<'_>) {
    println!("\n=== Review ===");
    for (i, review) in quiz.review().iter().enumerate() {
        let mark = if review.is_correct { "✓" } else { "✗" };
        println!(
            "{mark} Q{}: picked {}, correct {}",
            i + 1,
            review.selected + 1,
            review.correct_answer + 1
        );
    }
}

fn print_outcome(employee_name: &str, outcome: &QuizOutcome, certificate_id: Option<&str>) {
    println!(
        "\n{employee_name} scored {}% ({}/{} correct)",
        outcome.score, outcome.correct, outcome.total
    );
    if outcome.passed {
        println!("✓ Passed");
    } else {
        println!("✗ Not passed; {PASS_THRESHOLD}% is needed to pass");
    }
    if let Some(id) = certificate_id {
        println!("✓ Certificate issued: {id}");
    }
}
