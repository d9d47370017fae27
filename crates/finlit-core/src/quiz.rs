//! Financial-literacy quiz: fixed question bank and a single-run session.

use serde::Serialize;

use crate::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Question {
    pub prompt: &'static str,
    pub options: [&'static str; 4],
    pub answer: usize,
}

impl Question {
    pub fn correct_option(&self) -> &'static str {
        self.options[self.answer]
    }
}

pub const QUESTION_BANK: [Question; 8] = [
    Question {
        prompt: "What is a credit score?",
        options: [
            "Bank balance",
            "Annual income",
            "A number showing creditworthiness",
            "Loans taken",
        ],
        answer: 2,
    },
    Question {
        prompt: "How to improve credit score?",
        options: [
            "Pay bills on time",
            "Apply for many loans",
            "Close old accounts",
            "Ignore reports",
        ],
        answer: 0,
    },
    Question {
        prompt: "What is credit utilization?",
        options: [
            "Annual income",
            "Used credit % of total",
            "Savings in account",
            "Loan interest rate",
        ],
        answer: 1,
    },
    Question {
        prompt: "What lowers your score?",
        options: ["Late payments", "High savings", "Low income", "Few accounts"],
        answer: 0,
    },
    Question {
        prompt: "Good credit behavior?",
        options: [
            "Max out cards",
            "Open many accounts quickly",
            "Ignore statements",
            "Pay on time",
        ],
        answer: 3,
    },
    Question {
        prompt: "Credit report shows?",
        options: ["Salary details", "Savings", "Credit history", "Taxes paid"],
        answer: 2,
    },
    Question {
        prompt: "High utilization impact?",
        options: ["Lowers score", "Raises score", "No impact", "Increases income"],
        answer: 0,
    },
    Question {
        prompt: "Best way to build credit?",
        options: [
            "Avoid cards",
            "Borrow from friends",
            "Take loans constantly",
            "Use credit responsibly",
        ],
        answer: 3,
    },
];

/// Result of answering the current question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub correct: bool,
    pub correct_option: usize,
}

#[derive(Debug, Clone)]
pub struct QuizSession {
    questions: &'static [Question],
    current: usize,
    selected: Option<usize>,
    score: usize,
    finished: bool,
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new(&QUESTION_BANK)
    }
}

impl QuizSession {
    pub fn new(questions: &'static [Question]) -> Self {
        Self {
            questions,
            current: 0,
            selected: None,
            score: 0,
            finished: questions.is_empty(),
        }
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    /// Zero-based index of the question on screen.
    pub fn position(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> Option<&Question> {
        if self.finished {
            None
        } else {
            self.questions.get(self.current)
        }
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Locks in an answer for the current question. Only the first answer counts.
    pub fn answer(&mut self, option: usize) -> Result<AnswerFeedback, CoreError> {
        let question = *self
            .current()
            .ok_or_else(|| CoreError::Validation("The quiz is already finished".into()))?;
        if self.selected.is_some() {
            return Err(CoreError::Validation(
                "This question has already been answered".into(),
            ));
        }
        if option >= question.options.len() {
            return Err(CoreError::Validation(format!(
                "Pick an option between 1 and {}",
                question.options.len()
            )));
        }
        self.selected = Some(option);
        let correct = option == question.answer;
        if correct {
            self.score += 1;
        }
        Ok(AnswerFeedback {
            correct,
            correct_option: question.answer,
        })
    }

    /// Moves to the next question, or finishes after the last one.
    pub fn advance(&mut self) -> Result<(), CoreError> {
        if self.finished {
            return Err(CoreError::Validation("The quiz is already finished".into()));
        }
        if self.selected.is_none() {
            return Err(CoreError::Validation(
                "Answer the current question first".into(),
            ));
        }
        if self.current + 1 < self.questions.len() {
            self.current += 1;
            self.selected = None;
        } else {
            self.finished = true;
        }
        Ok(())
    }

    pub fn progress_percent(&self) -> f64 {
        if self.questions.is_empty() {
            return 100.0;
        }
        let answered = if self.selected.is_some() { 1 } else { 0 };
        (self.current + answered) as f64 / self.questions.len() as f64 * 100.0
    }

    /// Rating out of five, rounded.
    pub fn stars(&self) -> u8 {
        if self.questions.is_empty() {
            return 0;
        }
        (self.score as f64 / self.questions.len() as f64 * 5.0).round() as u8
    }

    pub fn is_perfect(&self) -> bool {
        self.finished && self.score == self.questions.len()
    }

    pub fn restart(&mut self) {
        *self = Self::new(self.questions);
    }
}
