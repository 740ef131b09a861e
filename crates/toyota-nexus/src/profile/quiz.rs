use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::{
    PreferenceProfile, ProfileUpdate, SpendingStyle, VehicleEmotion, WeekendVibe,
};
use super::store::{ProfileContext, ProfileError};

/// Minimum trimmed length for the "next chapter" narrative.
pub const MIN_FUTURE_CHAPTER_LENGTH: usize = 40;

/// Ordered quiz steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizStep {
    WeekendVibe,
    VehicleEmotion,
    SpendingStyle,
    FutureChapter,
    Financials,
}

impl QuizStep {
    pub const ALL: [QuizStep; 5] = [
        QuizStep::WeekendVibe,
        QuizStep::VehicleEmotion,
        QuizStep::SpendingStyle,
        QuizStep::FutureChapter,
        QuizStep::Financials,
    ];

    pub const TOTAL: usize = Self::ALL.len();

    /// 1-based position shown to the user.
    pub const fn number(self) -> usize {
        match self {
            QuizStep::WeekendVibe => 1,
            QuizStep::VehicleEmotion => 2,
            QuizStep::SpendingStyle => 3,
            QuizStep::FutureChapter => 4,
            QuizStep::Financials => 5,
        }
    }

    pub const fn prompt(self) -> &'static str {
        match self {
            QuizStep::WeekendVibe => "What does your typical weekend look like?",
            QuizStep::VehicleEmotion => {
                "When you picture your next ride, what feeling hits first?"
            }
            QuizStep::SpendingStyle => "You get a free Saturday and $500. What happens?",
            QuizStep::FutureChapter => "Describe the next chapter of your life",
            QuizStep::Financials => "Link your finances for a sharper budget picture",
        }
    }

    pub fn following(self) -> Option<Self> {
        Self::ALL.get(self.number()).copied()
    }

    pub fn preceding(self) -> Option<Self> {
        self.number()
            .checked_sub(2)
            .and_then(|index| Self::ALL.get(index).copied())
    }

    pub fn is_last(self) -> bool {
        self.following().is_none()
    }
}

/// Outcome of the bank-linking step. The link itself happens outside this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BankLinkState {
    #[default]
    NotStarted,
    Skipped,
    Linked,
    Analyzed,
}

/// Answers held by the wizard until each step is confirmed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QuizAnswers {
    pub weekend_vibe: Option<WeekendVibe>,
    pub vehicle_emotion: Option<VehicleEmotion>,
    pub spending_style: Option<SpendingStyle>,
    pub future_chapter_narrative: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizTransition {
    Advanced(QuizStep),
    Completed,
}

#[derive(Debug, thiserror::Error)]
pub enum QuizError {
    #[error("step {} is incomplete: {}", .0.number(), .0.prompt())]
    Incomplete(QuizStep),
    #[error(transparent)]
    Profile(#[from] ProfileError),
}

/// Linear quiz wizard feeding a [`ProfileContext`].
#[derive(Debug, Clone)]
pub struct ProfileQuiz {
    step: QuizStep,
    answers: QuizAnswers,
    signed_in: bool,
    bank_link: BankLinkState,
}

impl ProfileQuiz {
    pub fn new(signed_in: bool) -> Self {
        Self {
            step: QuizStep::WeekendVibe,
            answers: QuizAnswers::default(),
            signed_in,
            bank_link: BankLinkState::NotStarted,
        }
    }

    /// Start at step 1 with answers prefilled from a stored profile.
    pub fn resume(profile: &PreferenceProfile, signed_in: bool) -> Self {
        let mut quiz = Self::new(signed_in);
        quiz.answers = QuizAnswers {
            weekend_vibe: profile.weekend_vibe,
            vehicle_emotion: profile.vehicle_emotion,
            spending_style: profile.spending_style,
            future_chapter_narrative: profile.future_chapter_narrative.clone(),
        };
        quiz
    }

    pub fn current_step(&self) -> QuizStep {
        self.step
    }

    pub fn answers(&self) -> &QuizAnswers {
        &self.answers
    }

    pub fn answers_mut(&mut self) -> &mut QuizAnswers {
        &mut self.answers
    }

    pub fn bank_link(&self) -> BankLinkState {
        self.bank_link
    }

    pub fn set_bank_link(&mut self, state: BankLinkState) {
        self.bank_link = state;
    }

    pub fn progress_percent(&self) -> u8 {
        ((self.step.number() * 100) / QuizStep::TOTAL) as u8
    }

    pub fn can_proceed(&self) -> bool {
        self.step_satisfied(self.step)
    }

    pub fn step_satisfied(&self, step: QuizStep) -> bool {
        match step {
            QuizStep::WeekendVibe => self.answers.weekend_vibe.is_some(),
            QuizStep::VehicleEmotion => self.answers.vehicle_emotion.is_some(),
            QuizStep::SpendingStyle => self.answers.spending_style.is_some(),
            QuizStep::FutureChapter => {
                self.answers.future_chapter_narrative.trim().chars().count()
                    >= MIN_FUTURE_CHAPTER_LENGTH
            }
            QuizStep::Financials => {
                !self.signed_in || self.bank_link != BankLinkState::NotStarted
            }
        }
    }

    /// Confirm the current step. Each confirmed answer is written to the
    /// context so an abandoned quiz still leaves partial progress behind; the
    /// last step also marks the profile completed at `now`.
    pub fn next(
        &mut self,
        context: &mut ProfileContext,
        now: DateTime<Utc>,
    ) -> Result<QuizTransition, QuizError> {
        if !self.can_proceed() {
            return Err(QuizError::Incomplete(self.step));
        }

        context.update(self.update_for(self.step))?;

        match self.step.following() {
            Some(following) => {
                debug!(from = self.step.number(), to = following.number(), "quiz advanced");
                self.step = following;
                Ok(QuizTransition::Advanced(following))
            }
            None => {
                context.complete(now);
                debug!("quiz completed");
                Ok(QuizTransition::Completed)
            }
        }
    }

    /// Step back one question; stays on step 1.
    pub fn back(&mut self) -> QuizStep {
        if let Some(previous) = self.step.preceding() {
            self.step = previous;
        }
        self.step
    }

    fn update_for(&self, step: QuizStep) -> ProfileUpdate {
        match step {
            QuizStep::WeekendVibe => ProfileUpdate {
                weekend_vibe: self.answers.weekend_vibe,
                ..ProfileUpdate::default()
            },
            QuizStep::VehicleEmotion => ProfileUpdate {
                vehicle_emotion: self.answers.vehicle_emotion,
                ..ProfileUpdate::default()
            },
            QuizStep::SpendingStyle => ProfileUpdate {
                spending_style: self.answers.spending_style,
                ..ProfileUpdate::default()
            },
            QuizStep::FutureChapter | QuizStep::Financials => ProfileUpdate {
                future_chapter_narrative: Some(
                    self.answers.future_chapter_narrative.trim().to_string(),
                ),
                ..ProfileUpdate::default()
            },
        }
    }
}
