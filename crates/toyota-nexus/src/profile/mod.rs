//! User preference profile, its explicit owner, and the onboarding quiz.

pub mod domain;
mod quiz;
mod store;

pub use domain::{
    BodyStylePreference, ChargingAccess, DrivingStyle, FinanceGoal, FuelPreference, Parking,
    PreferenceProfile, ProfileUpdate, SpendingStyle, VehicleEmotion, WeekendVibe,
};
pub use quiz::{
    BankLinkState, ProfileQuiz, QuizAnswers, QuizError, QuizStep, QuizTransition,
    MIN_FUTURE_CHAPTER_LENGTH,
};
pub use store::{ProfileContext, ProfileError};
