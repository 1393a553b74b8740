// src/quiz.rs
//
// Sequenciador do quiz de um parque. O tempo entra de fora (`now`), medido
// desde o início do app, para que a UI use o relógio do egui e os testes
// usem valores fixos.

use crate::error::QuizError;
use crate::model::QuizQuestion;
use std::time::Duration;

pub const DEFAULT_FEEDBACK_DELAY: Duration = Duration::from_millis(1500);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizState {
    InProgress { index: usize, score: usize },
    Finished { score: usize },
}

/// Transição agendada para a próxima pergunta. `cancel` a descarta.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScheduledAdvance {
    due: Duration,
    cancelled: bool,
}

impl ScheduledAdvance {
    fn at(due: Duration) -> Self {
        Self {
            due,
            cancelled: false,
        }
    }

    pub fn due(&self) -> Duration {
        self.due
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    fn is_ready(&self, now: Duration) -> bool {
        !self.cancelled && now >= self.due
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Feedback {
    chosen: String,
    advance: ScheduledAdvance,
}

/// Como pintar cada opção durante o feedback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionFeedback {
    Correct,
    ChosenWrong,
    Neutral,
}

#[derive(Clone, Debug)]
pub struct QuizSession {
    questions: Vec<QuizQuestion>,
    index: usize,
    score: usize,
    finished: bool,
    feedback: Option<Feedback>,
    delay: Duration,
}

impl QuizSession {
    pub fn new(questions: Vec<QuizQuestion>, delay: Duration) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::Empty);
        }
        Ok(Self {
            questions,
            index: 0,
            score: 0,
            finished: false,
            feedback: None,
            delay,
        })
    }

    pub fn state(&self) -> QuizState {
        if self.finished {
            QuizState::Finished { score: self.score }
        } else {
            QuizState::InProgress {
                index: self.index,
                score: self.score,
            }
        }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn current_question(&self) -> Option<&QuizQuestion> {
        if self.finished {
            None
        } else {
            self.questions.get(self.index)
        }
    }

    pub fn feedback_visible(&self) -> bool {
        self.feedback.is_some()
    }

    pub fn chosen_answer(&self) -> Option<&str> {
        self.feedback.as_ref().map(|f| f.chosen.as_str())
    }

    pub fn pending_advance(&self) -> Option<&ScheduledAdvance> {
        self.feedback.as_ref().map(|f| &f.advance)
    }

    /// Registra a resposta da pergunta atual e agenda o avanço.
    /// Devolve se a resposta estava certa.
    pub fn answer(&mut self, option: &str, now: Duration) -> Result<bool, QuizError> {
        if self.finished {
            return Err(QuizError::Finished);
        }
        if self.feedback.is_some() {
            return Err(QuizError::FeedbackPending);
        }
        let question = &self.questions[self.index];
        if !question.has_option(option) {
            return Err(QuizError::UnknownOption(option.to_owned()));
        }

        let correct = question.is_correct(option);
        if correct {
            self.score += 1;
        }
        self.feedback = Some(Feedback {
            chosen: option.to_owned(),
            advance: ScheduledAdvance::at(now + self.delay),
        });
        Ok(correct)
    }

    /// Avança se o prazo do feedback passou. Devolve `true` quando houve transição.
    /// Um avanço cancelado nunca dispara; a pergunta fica travada até `restart`.
    pub fn tick(&mut self, now: Duration) -> bool {
        let ready = self.feedback.as_ref().is_some_and(|f| f.advance.is_ready(now));
        if !ready {
            return false;
        }

        self.feedback = None;
        if self.index + 1 < self.questions.len() {
            self.index += 1;
        } else {
            self.finished = true;
            log::info!("quiz finished: {}/{}", self.score, self.questions.len());
        }
        true
    }

    /// Tempo que falta para o avanço agendado, se houver.
    pub fn time_until_advance(&self, now: Duration) -> Option<Duration> {
        self.pending_advance()
            .filter(|a| !a.is_cancelled())
            .map(|a| a.due().saturating_sub(now))
    }

    /// Cancela o avanço agendado sem mexer na pontuação.
    pub fn cancel_pending(&mut self) {
        if let Some(f) = &mut self.feedback {
            f.advance.cancel();
        }
    }

    pub fn restart(&mut self) {
        self.cancel_pending();
        self.feedback = None;
        self.index = 0;
        self.score = 0;
        self.finished = false;
    }

    pub fn option_feedback(&self, option: &str) -> OptionFeedback {
        let (Some(chosen), Some(question)) = (self.chosen_answer(), self.questions.get(self.index))
        else {
            return OptionFeedback::Neutral;
        };
        if question.is_correct(option) {
            OptionFeedback::Correct
        } else if option == chosen {
            OptionFeedback::ChosenWrong
        } else {
            OptionFeedback::Neutral
        }
    }
}
