pub mod questions;

pub use questions::Question;

use crate::error::Result;

pub const INTRO_TEXT: &str = "Проверьте, как вы переводите градусы в радианы и обратно";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    InProgress,
    Answered { selected: usize },
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionMark {
    Neutral,
    Correct,
    Wrong,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OptionView {
    pub text: String,
    pub mark: OptionMark,
    pub disabled: bool,
}

/// Everything the quiz panel shows, derived from the engine state.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizView {
    pub title: String,
    pub options: Vec<OptionView>,
    /// Percent, 0 to 100.
    pub progress: f32,
    pub counter: String,
    pub score: u32,
    pub explanation: Option<String>,
    pub start_visible: bool,
    pub next_visible: bool,
    pub restart_visible: bool,
}

pub struct QuizEngine {
    questions: Vec<Question>,
    phase: Phase,
    current_index: usize,
    score: u32,
}

impl QuizEngine {
    pub fn new(questions: Vec<Question>) -> Result<QuizEngine> {
        questions::validate(&questions)?;
        Ok(QuizEngine {
            questions,
            phase: Phase::NotStarted,
            current_index: 0,
            score: 0,
        })
    }

    pub fn builtin() -> QuizEngine {
        QuizEngine {
            questions: questions::builtin(),
            phase: Phase::NotStarted,
            current_index: 0,
            score: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_answered(&self) -> bool {
        matches!(self.phase, Phase::Answered { .. })
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn start(&mut self) -> bool {
        if !matches!(self.phase, Phase::NotStarted | Phase::Finished) {
            return false;
        }

        self.current_index = 0;
        self.score = 0;
        self.phase = Phase::InProgress;
        log::debug!("Quiz started with {} questions", self.questions.len());
        true
    }

    pub fn restart(&mut self) -> bool {
        self.phase == Phase::Finished && self.start()
    }

    pub fn select_option(&mut self, selected: usize) -> bool {
        if self.phase != Phase::InProgress || selected >= questions::OPTION_COUNT {
            return false;
        }

        let correct = self.questions[self.current_index].correct;
        if selected == correct {
            self.score += 1;
        }
        self.phase = Phase::Answered { selected };
        log::debug!(
            "Question {}: picked {}, correct is {}, score {}",
            self.current_index + 1,
            selected,
            correct,
            self.score
        );
        true
    }

    pub fn advance(&mut self) -> bool {
        if !self.is_answered() {
            return false;
        }

        self.current_index += 1;
        if self.current_index < self.questions.len() {
            self.phase = Phase::InProgress;
        } else {
            self.phase = Phase::Finished;
            log::debug!("Quiz finished: {} of {}", self.score, self.questions.len());
        }
        true
    }

    pub fn view(&self) -> QuizView {
        let total = self.questions.len();
        let mut view = QuizView {
            title: String::new(),
            options: Vec::new(),
            progress: 0.0,
            counter: String::new(),
            score: self.score,
            explanation: None,
            start_visible: false,
            next_visible: false,
            restart_visible: false,
        };

        match self.phase {
            Phase::NotStarted => {
                view.title = INTRO_TEXT.to_owned();
                view.start_visible = true;
            }
            Phase::InProgress | Phase::Answered { .. } => {
                let question = &self.questions[self.current_index];
                let selected = match self.phase {
                    Phase::Answered { selected } => Some(selected),
                    _ => None,
                };

                view.title = question.text.clone();
                view.options = question
                    .options
                    .iter()
                    .enumerate()
                    .map(|(i, text)| OptionView {
                        text: text.clone(),
                        mark: match selected {
                            Some(_) if i == question.correct => OptionMark::Correct,
                            Some(picked) if i == picked => OptionMark::Wrong,
                            _ => OptionMark::Neutral,
                        },
                        disabled: selected.is_some(),
                    })
                    .collect();
                view.progress = 100.0 * self.current_index as f32 / total as f32;
                view.counter = counter_text(self.current_index, total);
                view.explanation = selected
                    .filter(|_| !question.explanation.is_empty())
                    .map(|_| question.explanation.clone());
                view.next_visible = selected.is_some();
            }
            Phase::Finished => {
                view.title = format!(
                    "Тест завершен! Ваш результат: {} из {}",
                    self.score, total
                );
                view.progress = 100.0;
                view.counter = counter_text(total - 1, total);
                view.restart_visible = true;
            }
        }

        view
    }
}

fn counter_text(index: usize, total: usize) -> String {
    format!("Вопрос {} из {}", index + 1, total)
}
