//! Vehicle matching, finance estimates, and the onboarding quiz behind Toyota Nexus.

pub mod assistant;
pub mod catalog;
pub mod config;
pub mod error;
pub mod finance;
pub mod matching;
pub mod profile;
pub mod telemetry;
