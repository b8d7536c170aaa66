//! Quiz (generated MCQ) state and scoring

use std::collections::BTreeMap;

use crate::api::{ApiError, Choice, Question, UnitId};

use super::{Load, ScrollState};

/// Answers chosen so far, keyed by question index
///
/// Created empty for every quiz session and dropped with the view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSheet {
    answers: BTreeMap<usize, Choice>,
}

impl AnswerSheet {
    /// Record `choice` for question `index`, replacing any earlier answer
    pub fn choose(&mut self, index: usize, choice: Choice) {
        self.answers.insert(index, choice);
    }

    /// Forget the answer for question `index`
    pub fn clear(&mut self, index: usize) {
        self.answers.remove(&index);
    }

    pub fn get(&self, index: usize) -> Option<Choice> {
        self.answers.get(&index).copied()
    }

    pub fn answered(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// Number of answered questions whose letter matches the answer key
    ///
    /// Unanswered questions never count; answers for indices past the end of
    /// `questions` are ignored.
    pub fn score(&self, questions: &[Question]) -> usize {
        questions
            .iter()
            .enumerate()
            .filter(|(i, q)| self.get(*i).is_some_and(|choice| q.is_correct(choice)))
            .count()
    }
}

/// State of a quiz view (`/mcq/:id`)
#[derive(Debug, Clone)]
pub struct QuizView {
    pub unit_id: UnitId,
    pub questions: Load<Vec<Question>>,
    pub answers: AnswerSheet,
    /// Question the cursor is on
    pub current: usize,
    /// Last submitted score
    pub score: Option<usize>,
    pub scroll: ScrollState,
}

impl QuizView {
    pub const LOADING: &'static str = "Generating MCQs...";
    pub const FAILED: &'static str = "Failed to generate MCQs";
    pub const NO_QUESTIONS: &'static str = "No MCQs returned from server";

    pub fn new(unit_id: UnitId) -> Self {
        Self {
            unit_id,
            questions: Load::Loading,
            answers: AnswerSheet::default(),
            current: 0,
            score: None,
            scroll: ScrollState::default(),
        }
    }

    /// Store the outcome of `GET /generate-mcq/{id}`
    pub fn apply(&mut self, result: Result<Vec<Question>, ApiError>) {
        self.questions = match result {
            Ok(questions) => {
                tracing::info!(unit = %self.unit_id, count = questions.len(), "questions loaded");
                Load::Ready(questions)
            }
            Err(e) if e.is_missing_questions() => {
                tracing::warn!(unit = %self.unit_id, error = %e, "no questions in response");
                Load::Failed(Self::NO_QUESTIONS)
            }
            Err(e) => {
                tracing::warn!(unit = %self.unit_id, status = ?e.status(), error = %e, "failed to generate questions");
                Load::Failed(Self::FAILED)
            }
        };
    }

    pub fn question_count(&self) -> usize {
        self.questions.ready().map_or(0, Vec::len)
    }

    pub fn next_question(&mut self) {
        if self.current + 1 < self.question_count() {
            self.current += 1;
        }
    }

    pub fn prev_question(&mut self) {
        self.current = self.current.saturating_sub(1);
    }

    pub fn first_question(&mut self) {
        self.current = 0;
    }

    pub fn last_question(&mut self) {
        self.current = self.question_count().saturating_sub(1);
    }

    /// Select `choice` on the current question
    ///
    /// Selecting the option that is already chosen deselects it.
    pub fn toggle(&mut self, choice: Choice) {
        if self.question_count() == 0 {
            return;
        }
        if self.answers.get(self.current) == Some(choice) {
            self.answers.clear(self.current);
        } else {
            self.answers.choose(self.current, choice);
        }
    }

    /// Clear the answer on the current question
    pub fn clear_current(&mut self) {
        self.answers.clear(self.current);
    }

    /// Compute and keep the score; may be called any number of times
    pub fn submit(&mut self) -> Option<usize> {
        let questions = self.questions.ready()?;
        let score = self.answers.score(questions);
        tracing::info!(unit = %self.unit_id, score, total = questions.len(), "quiz submitted");
        self.score = Some(score);
        self.score
    }

    pub fn heading(&self) -> String {
        format!("MCQ Test for Unit {}", self.unit_id)
    }

    /// Score line shown after submission
    pub fn score_line(&self) -> Option<String> {
        self.score.map(|s| format!("Your score: {} / {}", s, self.question_count()))
    }
}
