//! # Confirmations
//!
//! Destructive operations ask before they touch the store. The question is a
//! [`ConfirmationPrompt`]; whoever drives the operation answers it through a
//! [`Confirmer`]. A declined prompt ends the operation without side effects.
//!
//! An immediate-mode UI cannot block inside an operation while a dialog is
//! open. [`ReplayConfirmer`] lets it run the operation once per answer
//! instead: every run replays the answers given so far, and the first prompt
//! without an answer is recorded and declined. The UI shows that prompt, adds
//! the user's answer and runs the operation again.

/// A question asked before a destructive step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationPrompt {
    RemoveContainer { container_id: String },
    CascadeSchedules { container_id: String, schedule_count: usize },
    RemoveSchedule { schedule_id: i64 },
}

impl ConfirmationPrompt {
    pub fn title(&self) -> &'static str {
        match self {
            ConfirmationPrompt::CascadeSchedules { .. } => "Warning",
            _ => "Confirm",
        }
    }

    /// Text shown to the user
    pub fn message(&self) -> String {
        match self {
            ConfirmationPrompt::RemoveContainer { container_id } => {
                format!("Do you really want to remove container {}?", container_id)
            }
            ConfirmationPrompt::CascadeSchedules {
                container_id,
                schedule_count,
            } => format!(
                "Container {} has {} schedule(s). Do you want to remove them too?",
                container_id, schedule_count
            ),
            ConfirmationPrompt::RemoveSchedule { schedule_id } => {
                format!("Do you really want to remove schedule {}?", schedule_id)
            }
        }
    }
}

/// Answers confirmation prompts; `true` means go ahead
pub trait Confirmer {
    fn confirm(&mut self, prompt: &ConfirmationPrompt) -> bool;
}

impl<F> Confirmer for F
where
    F: FnMut(&ConfirmationPrompt) -> bool,
{
    fn confirm(&mut self, prompt: &ConfirmationPrompt) -> bool {
        self(prompt)
    }
}

/// Replays recorded answers and captures the first prompt it cannot answer
#[derive(Debug, Default)]
pub struct ReplayConfirmer {
    answers: Vec<bool>,
    asked: usize,
    pending: Option<ConfirmationPrompt>,
}

impl ReplayConfirmer {
    pub fn new(answers: Vec<bool>) -> Self {
        Self {
            answers,
            asked: 0,
            pending: None,
        }
    }

    /// The prompt the last run stopped at, if it ran out of answers
    pub fn take_pending(&mut self) -> Option<ConfirmationPrompt> {
        self.pending.take()
    }
}

impl Confirmer for ReplayConfirmer {
    fn confirm(&mut self, prompt: &ConfirmationPrompt) -> bool {
        let answer = self.answers.get(self.asked).copied();
        self.asked += 1;
        match answer {
            Some(answer) => answer,
            None => {
                if self.pending.is_none() {
                    self.pending = Some(prompt.clone());
                }
                false
            }
        }
    }
}
