//! Quiz scoring and the course reading/quiz flow
//!
//! Scoring: `score = round(correct / total * 100)` (half rounds up), and an
//! attempt passes at [`PASS_THRESHOLD`] or above.

use crate::core::models::{Course, CoursePage, QuizQuestion};
use thiserror::Error;

/// Minimum percentage score that passes a quiz
pub const PASS_THRESHOLD: u8 = 80;

/// Errors raised while taking a quiz
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    /// The course has no questions
    #[error("Course '{0}' has no quiz questions")]
    EmptyQuiz(String),

    /// A question has no selected answer (0-based index)
    #[error("Question {} has not been answered", .0 + 1)]
    Unanswered(usize),

    /// The selected option does not exist
    #[error("Option {index} is out of range; question has {count} options")]
    InvalidOption {
        /// Selected option index
        index: usize,
        /// Number of options on the question
        count: usize,
    },

    /// More answers were supplied than there are questions
    #[error("Got {given} answers for {total} questions")]
    TooManyAnswers {
        /// Answers supplied
        given: usize,
        /// Questions in the quiz
        total: usize,
    },
}

/// Percentage of correct answers, rounded half up. An empty quiz scores 0.
#[must_use]
pub fn score_percent(correct: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let correct = correct.min(total);
    // round(100 * c / t) == floor((200 * c + t) / (2 * t))
    let percent = (correct * 200 + total) / (total * 2);
    u8::try_from(percent).unwrap_or(100)
}

/// Whether a score passes
#[must_use]
pub const fn is_passing(score: u8) -> bool {
    score >= PASS_THRESHOLD
}

/// Result of a submitted quiz
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizOutcome {
    /// Course the quiz belongs to
    pub course_id: String,
    /// Correctly answered questions
    pub correct: usize,
    /// Questions in the quiz
    pub total: usize,
    /// Percentage score
    pub score: u8,
    /// `score >= PASS_THRESHOLD`
    pub passed: bool,
}

impl QuizOutcome {
    /// Derive score and pass flag from answer counts
    #[must_use]
    pub fn from_counts(course_id: &str, correct: usize, total: usize) -> Self {
        let score = score_percent(correct, total);
        Self {
            course_id: course_id.to_string(),
            correct,
            total,
            score,
            passed: is_passing(score),
        }
    }
}

/// Per-question result shown after submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerReview {
    /// Question id
    pub question_id: String,
    /// Option the learner picked
    pub selected: usize,
    /// Correct option
    pub correct_answer: usize,
    /// Whether the pick was right
    pub is_correct: bool,
}

/// What happened on [`QuizSession::next`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizStep {
    /// Moved to the question at this index
    Advanced(usize),
    /// The last question is answered; the quiz can be submitted
    Finished,
}

/// Sequential single-select quiz over one course.
///
/// Answers are held per question; nothing is scored until [`submit`](Self::submit).
#[derive(Debug, Clone)]
pub struct QuizSession<'a> {
    course: &'a Course,
    current: usize,
    answers: Vec<Option<usize>>,
}

impl<'a> QuizSession<'a> {
    /// Start a quiz at the first question
    ///
    /// # Errors
    /// Returns [`QuizError::EmptyQuiz`] if the course has no questions
    pub fn new(course: &'a Course) -> Result<Self, QuizError> {
        if course.quiz.is_empty() {
            return Err(QuizError::EmptyQuiz(course.id.clone()));
        }
        Ok(Self {
            course,
            current: 0,
            answers: vec![None; course.quiz.len()],
        })
    }

    /// Course being quizzed
    #[must_use]
    pub const fn course(&self) -> &'a Course {
        self.course
    }

    /// Index of the current question
    #[must_use]
    pub const fn current_index(&self) -> usize {
        self.current
    }

    /// Current question
    #[must_use]
    pub fn current_question(&self) -> &'a QuizQuestion {
        &self.course.quiz[self.current]
    }

    /// Number of questions
    #[must_use]
    pub fn question_count(&self) -> usize {
        self.answers.len()
    }

    /// Whether the current question is the last one
    #[must_use]
    pub fn is_last_question(&self) -> bool {
        self.current + 1 == self.answers.len()
    }

    /// Selected option for a question, if any
    #[must_use]
    pub fn answer(&self, index: usize) -> Option<usize> {
        self.answers.get(index).copied().flatten()
    }

    /// Select an option for the current question, replacing any earlier pick
    ///
    /// # Errors
    /// Returns [`QuizError::InvalidOption`] if the option does not exist
    pub fn select_answer(&mut self, option: usize) -> Result<(), QuizError> {
        let count = self.current_question().options.len();
        if option >= count {
            return Err(QuizError::InvalidOption {
                index: option,
                count,
            });
        }
        self.answers[self.current] = Some(option);
        Ok(())
    }

    /// Move to the next question
    ///
    /// # Errors
    /// Returns [`QuizError::Unanswered`] if the current question has no answer
    pub fn next(&mut self) -> Result<QuizStep, QuizError> {
        if self.answers[self.current].is_none() {
            return Err(QuizError::Unanswered(self.current));
        }
        if self.is_last_question() {
            return Ok(QuizStep::Finished);
        }
        self.current += 1;
        Ok(QuizStep::Advanced(self.current))
    }

    /// Move back one question. Returns `false` on the first question.
    pub fn previous(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.current -= 1;
        true
    }

    /// Answer questions in order from the current one, advancing after each
    ///
    /// # Errors
    /// Fails on the first invalid option, or if more answers than remaining questions are given
    pub fn answer_all(&mut self, options: &[usize]) -> Result<(), QuizError> {
        let remaining = self.answers.len() - self.current;
        if options.len() > remaining {
            return Err(QuizError::TooManyAnswers {
                given: options.len(),
                total: self.answers.len(),
            });
        }
        for &option in options {
            self.select_answer(option)?;
            self.next()?;
        }
        Ok(())
    }

    /// Whether every question has an answer
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.answers.iter().all(Option::is_some)
    }

    /// Score the quiz
    ///
    /// # Errors
    /// Returns [`QuizError::Unanswered`] with the first unanswered question
    pub fn submit(&self) -> Result<QuizOutcome, QuizError> {
        if let Some(missing) = self.answers.iter().position(Option::is_none) {
            return Err(QuizError::Unanswered(missing));
        }
        let correct = self.review().iter().filter(|r| r.is_correct).count();
        Ok(QuizOutcome::from_counts(
            &self.course.id,
            correct,
            self.answers.len(),
        ))
    }

    /// Per-question results for answered questions
    #[must_use]
    pub fn review(&self) -> Vec<AnswerReview> {
        self.course
            .quiz
            .iter()
            .zip(&self.answers)
            .filter_map(|(question, answer)| {
                answer.map(|selected| AnswerReview {
                    question_id: question.id.clone(),
                    selected,
                    correct_answer: question.correct_answer,
                    is_correct: question.is_correct(selected),
                })
            })
            .collect()
    }
}

/// What happened on [`LessonProgress::next`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LessonStep {
    /// Moved to the page at this index
    Page(usize),
    /// Reading is done; the quiz comes next
    StartQuiz,
}

/// Position in a course's reading pages
#[derive(Debug, Clone)]
pub struct LessonProgress<'a> {
    course: &'a Course,
    page: usize,
}

impl<'a> LessonProgress<'a> {
    /// Start at the first page
    #[must_use]
    pub const fn new(course: &'a Course) -> Self {
        Self { course, page: 0 }
    }

    /// Index of the current page
    #[must_use]
    pub const fn page_index(&self) -> usize {
        self.page
    }

    /// Current page, `None` for a course without pages
    #[must_use]
    pub fn current_page(&self) -> Option<&'a CoursePage> {
        self.course.pages.get(self.page)
    }

    /// Whether the current page is the last one
    #[must_use]
    pub fn is_last_page(&self) -> bool {
        self.page + 1 >= self.course.pages.len()
    }

    /// Advance a page, or signal that the quiz is next
    pub fn next(&mut self) -> LessonStep {
        if self.is_last_page() {
            return LessonStep::StartQuiz;
        }
        self.page += 1;
        LessonStep::Page(self.page)
    }

    /// Go back one page. Returns `false` on the first page.
    pub fn previous(&mut self) -> bool {
        if self.page == 0 {
            return false;
        }
        self.page -= 1;
        true
    }

    /// Reading progress including the current page ("Lesson 2 of 3" is 67%)
    #[must_use]
    pub fn percent_complete(&self) -> u8 {
        if self.course.pages.is_empty() {
            return 100;
        }
        score_percent(self.page + 1, self.course.pages.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::Catalog;

    #[test]
    fn test_score_formula() {
        assert_eq!(score_percent(5, 5), 100);
        assert_eq!(score_percent(4, 5), 80);
        assert_eq!(score_percent(0, 5), 0);
        assert_eq!(score_percent(1, 3), 33);
        assert_eq!(score_percent(2, 3), 67);
        assert_eq!(score_percent(1, 8), 13);
        assert_eq!(score_percent(3, 0), 0);
    }

    #[test]
    fn test_score_matches_float_rounding() {
        for total in 1..=40_usize {
            for correct in 0..=total {
                #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let expected = ((correct * 100) as f64 / total as f64 + 0.5).floor() as u8;
                assert_eq!(score_percent(correct, total), expected, "{correct}/{total}");
            }
        }
    }

    #[test]
    fn test_pass_threshold() {
        assert!(is_passing(80));
        assert!(!is_passing(79));
        assert!(QuizOutcome::from_counts("c", 4, 5).passed);
        assert!(!QuizOutcome::from_counts("c", 3, 5).passed);
    }

    #[test]
    fn test_next_requires_answer() {
        let catalog = Catalog::builtin();
        let course = catalog.get("hospitality-1").unwrap();
        let mut session = QuizSession::new(course).unwrap();

        assert_eq!(session.next(), Err(QuizError::Unanswered(0)));
        session.select_answer(1).unwrap();
        assert_eq!(session.next(), Ok(QuizStep::Advanced(1)));
        assert!(session.previous());
        assert_eq!(session.answer(0), Some(1));
        assert!(!session.previous());
    }

    #[test]
    fn test_all_correct_passes() {
        let catalog = Catalog::builtin();
        let course = catalog.get("hospitality-1").unwrap();
        let answers: Vec<usize> = course.quiz.iter().map(|q| q.correct_answer).collect();

        let mut session = QuizSession::new(course).unwrap();
        session.answer_all(&answers).unwrap();
        assert!(session.is_complete());

        let outcome = session.submit().unwrap();
        assert_eq!(outcome.correct, 5);
        assert_eq!(outcome.score, 100);
        assert!(outcome.passed);
    }

    #[test]
    fn test_one_wrong_of_five_still_passes_two_wrong_fails() {
        let catalog = Catalog::builtin();
        let course = catalog.get("leadership-1").unwrap();
        let wrong = |q: &QuizQuestion| (q.correct_answer + 1) % q.options.len();

        let mut answers: Vec<usize> = course.quiz.iter().map(|q| q.correct_answer).collect();
        answers[0] = wrong(&course.quiz[0]);
        let mut session = QuizSession::new(course).unwrap();
        session.answer_all(&answers).unwrap();
        assert_eq!(session.submit().unwrap().score, 80);

        answers[1] = wrong(&course.quiz[1]);
        let mut session = QuizSession::new(course).unwrap();
        session.answer_all(&answers).unwrap();
        let outcome = session.submit().unwrap();
        assert_eq!(outcome.score, 60);
        assert!(!outcome.passed);
        assert_eq!(session.review().iter().filter(|r| !r.is_correct).count(), 2);
    }

    #[test]
    fn test_submit_reports_first_unanswered() {
        let catalog = Catalog::builtin();
        let course = catalog.get("digital-1").unwrap();
        let mut session = QuizSession::new(course).unwrap();
        session.answer_all(&[0, 0]).unwrap();
        assert_eq!(session.submit(), Err(QuizError::Unanswered(2)));
    }

    #[test]
    fn test_invalid_option_and_too_many_answers() {
        let catalog = Catalog::builtin();
        let course = catalog.get("digital-1").unwrap();
        let mut session = QuizSession::new(course).unwrap();
        let count = session.current_question().options.len();
        assert_eq!(
            session.select_answer(count),
            Err(QuizError::InvalidOption { index: count, count })
        );
        assert!(matches!(
            session.answer_all(&[0; 6]),
            Err(QuizError::TooManyAnswers { given: 6, total: 5 })
        ));
    }

    #[test]
    fn test_empty_quiz_rejected() {
        let mut course = Catalog::builtin().get("digital-1").unwrap().clone();
        course.quiz.clear();
        assert!(matches!(QuizSession::new(&course), Err(QuizError::EmptyQuiz(_))));
    }

    #[test]
    fn test_lesson_progress() {
        let catalog = Catalog::builtin();
        let course = catalog.get("work-life-1").unwrap();
        let mut lesson = LessonProgress::new(course);

        assert_eq!(lesson.percent_complete(), 33);
        assert_eq!(lesson.next(), LessonStep::Page(1));
        assert_eq!(lesson.percent_complete(), 67);
        assert_eq!(lesson.next(), LessonStep::Page(2));
        assert!(lesson.is_last_page());
        assert_eq!(lesson.next(), LessonStep::StartQuiz);
        assert_eq!(lesson.percent_complete(), 100);
        assert!(lesson.previous());
        assert_eq!(lesson.page_index(), 1);
    }
}
