//! Free-text recall quiz.
//!
//! A quiz asks for the Swedish meaning of a fixed number of randomly drawn
//! words. After each answer the quiz waits for an explicit `next`, so a
//! repeated submit cannot score the same question twice.

use crate::matching::{evaluate_against, AcceptedAnswers, AnswerStatus};
use crate::rotation::ExampleRotation;
use crate::types::{Direction, Example, Word};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;
use std::collections::HashSet;

/// Questions per quiz when no count is given.
pub const DEFAULT_QUIZ_COUNT: usize = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizPhase {
    #[default]
    Idle,
    /// No word has a Swedish answer.
    Unavailable,
    Prompt,
    AwaitingNext,
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizQuestion {
    pub word_id: String,
    pub prompt: String,
    /// Prompt is Farsi script (right-to-left).
    pub rtl: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Example>,
    /// 1-based.
    pub number: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Feedback {
    pub status: AnswerStatus,
    /// Accepted answers joined with ` / `.
    pub answer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_match: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizSummary {
    pub score: usize,
    pub almost: usize,
    pub wrong: usize,
    pub total: usize,
    /// Missed words, each listed once.
    pub mistakes: Vec<Word>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizSnapshot {
    pub phase: QuizPhase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<QuizQuestion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<Feedback>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<QuizSummary>,
}

pub struct QuizController {
    questions: Vec<Word>,
    current: usize,
    score: usize,
    almost: usize,
    wrong: usize,
    mistakes: Vec<Word>,
    phase: QuizPhase,
    question: Option<QuizQuestion>,
    feedback: Option<Feedback>,
    rotation: ExampleRotation,
    rng: StdRng,
}

impl Default for QuizController {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizController {
    pub fn new() -> Self {
        Self {
            questions: Vec::new(),
            current: 0,
            score: 0,
            almost: 0,
            wrong: 0,
            mistakes: Vec::new(),
            phase: QuizPhase::Idle,
            question: None,
            feedback: None,
            rotation: ExampleRotation::new(),
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    pub fn question(&self) -> Option<&QuizQuestion> {
        self.question.as_ref()
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    /// Start a quiz over `count` random words that have a Swedish answer.
    pub fn start(&mut self, words: &[Word], count: usize) -> QuizPhase {
        let mut pool: Vec<Word> = words.iter().filter(|w| !w.sv.is_empty()).cloned().collect();

        self.current = 0;
        self.score = 0;
        self.almost = 0;
        self.wrong = 0;
        self.mistakes.clear();
        self.question = None;
        self.feedback = None;

        if pool.is_empty() {
            self.questions.clear();
            self.phase = QuizPhase::Unavailable;
            return self.phase;
        }

        pool.shuffle(&mut self.rng);
        pool.truncate(count);
        self.questions = pool;
        tracing::debug!(questions = self.questions.len(), "quiz started");

        self.present();
        self.phase
    }

    fn present(&mut self) {
        let Some(word) = self.questions.get(self.current) else {
            self.finish();
            return;
        };

        let (prompt, rtl) = if word.fa.is_empty() {
            (word.translit.clone().unwrap_or_default(), false)
        } else {
            (word.fa.clone(), true)
        };
        let example = self.rotation.next(word, Direction::FaToSv, &mut self.rng);

        self.question = Some(QuizQuestion {
            word_id: word.id.clone(),
            prompt,
            rtl,
            example,
            number: self.current + 1,
            total: self.questions.len(),
        });
        self.feedback = None;
        self.phase = QuizPhase::Prompt;
    }

    /// Score an answer for the current question. Ignored unless a question is
    /// waiting for an answer.
    pub fn submit(&mut self, input: &str) -> Option<&Feedback> {
        if self.phase != QuizPhase::Prompt {
            return None;
        }
        let word = self.questions.get(self.current)?;
        let answers = AcceptedAnswers::for_word(word);
        let evaluation = evaluate_against(input, &answers);

        match evaluation.status {
            AnswerStatus::Correct => self.score += 1,
            AnswerStatus::Almost => {
                self.almost += 1;
                self.mistakes.push(word.clone());
            }
            AnswerStatus::Wrong => {
                self.wrong += 1;
                self.mistakes.push(word.clone());
            }
        }

        let answer = if answers.is_empty() {
            word.sv.clone()
        } else {
            answers.joined()
        };
        self.feedback = Some(Feedback {
            status: evaluation.status,
            answer,
            best_match: evaluation.best_match,
        });
        self.phase = QuizPhase::AwaitingNext;
        self.feedback.as_ref()
    }

    /// Give up on the current question; scored as wrong.
    pub fn skip(&mut self) -> Option<&Feedback> {
        self.submit("")
    }

    /// Acknowledge feedback and move on. Returns whether the quiz advanced.
    pub fn next(&mut self) -> bool {
        if self.phase != QuizPhase::AwaitingNext {
            return false;
        }
        self.current += 1;
        if self.current >= self.questions.len() {
            self.finish();
        } else {
            self.present();
        }
        true
    }

    fn finish(&mut self) {
        let mut seen = HashSet::new();
        self.mistakes.retain(|word| seen.insert(word.id.clone()));
        self.question = None;
        self.feedback = None;
        self.phase = QuizPhase::Finished;
        tracing::debug!(score = self.score, total = self.questions.len(), "quiz finished");
    }

    pub fn summary(&self) -> QuizSummary {
        QuizSummary {
            score: self.score,
            almost: self.almost,
            wrong: self.wrong,
            total: self.questions.len(),
            mistakes: self.mistakes.clone(),
        }
    }

    /// Ids of missed words, in the order they were missed.
    pub fn mistake_ids(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.mistakes
            .iter()
            .filter(|word| seen.insert(word.id.as_str()))
            .map(|word| word.id.clone())
            .collect()
    }

    pub fn snapshot(&self) -> QuizSnapshot {
        let summary = match self.phase {
            QuizPhase::Finished => Some(self.summary()),
            _ => None,
        };
        QuizSnapshot {
            phase: self.phase,
            question: self.question.clone(),
            feedback: self.feedback.clone(),
            summary,
        }
    }
}
