//! Context handed to the chat assistant.
//!
//! Only the text is assembled here; sending it to a model is left to the caller.

use std::fmt;

use serde::Serialize;

use crate::finance::format_currency;
use crate::matching::Recommendation;
use crate::profile::PreferenceProfile;

pub const ASSISTANT_PERSONA: &str =
    "You are Toyota Nexus AI. Use the provided context faithfully.";

const RESPONSE_GUIDANCE: &str = "Return concise, practical guidance (<= 120 words).";

const QUICK_SUGGESTIONS: [&str; 4] = [
    "Best hybrids under $400/mo",
    "Compare Camry vs. Corolla",
    "Explain lease vs finance",
    "Family-friendly SUVs",
];

/// Canned prompts offered before the user types anything.
pub fn quick_suggestions() -> &'static [&'static str] {
    &QUICK_SUGGESTIONS
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssistantContext {
    pub synopsis: String,
    pub highlights: Vec<String>,
    pub vehicles: Vec<String>,
}

impl AssistantContext {
    pub fn build(profile: &PreferenceProfile, recommendations: &[Recommendation]) -> Self {
        Self {
            synopsis: synopsis(profile),
            highlights: highlights(profile),
            vehicles: recommendations.iter().map(vehicle_line).collect(),
        }
    }

    /// Full prompt for one user turn.
    pub fn prompt(&self, user_message: &str) -> String {
        format!(
            "{}\n{}USER={}\n{}",
            ASSISTANT_PERSONA,
            self,
            user_message.trim(),
            RESPONSE_GUIDANCE
        )
    }
}

impl fmt::Display for AssistantContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "PROFILE={}", self.synopsis)?;
        for highlight in &self.highlights {
            writeln!(f, "TRAIT={highlight}")?;
        }
        for (rank, vehicle) in self.vehicles.iter().enumerate() {
            writeln!(f, "MATCH {}={vehicle}", rank + 1)?;
        }
        Ok(())
    }
}

/// One-line preference summary; unset fields are left out.
fn synopsis(profile: &PreferenceProfile) -> String {
    let mut parts = Vec::new();

    if let Some(budget) = profile.positive_budget() {
        parts.push(format!("Budget {budget:.0}/mo"));
    }

    let mut prefers = Vec::new();
    if let Some(fuel) = profile.fuel_type {
        prefers.push(fuel.label());
    }
    if let Some(body) = profile.body_style {
        prefers.push(body.label());
    }
    if !prefers.is_empty() {
        parts.push(format!("prefers {}", prefers.join(", ")));
    }

    if let Some(size) = profile.positive_family_size() {
        parts.push(format!("family {size}"));
    }
    if let Some(commute) = profile.positive_commute() {
        parts.push(format!("commute {commute:.0} mi/day"));
    }
    if !profile.lifestyle_tags.is_empty() {
        let tags: Vec<&str> = profile.lifestyle_tags.iter().map(String::as_str).collect();
        parts.push(format!("lifestyle {}", tags.join(",")));
    }

    if parts.is_empty() {
        "No stated preferences".to_string()
    } else {
        parts.join(", ")
    }
}

fn highlights(profile: &PreferenceProfile) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(vibe) = profile.weekend_vibe {
        lines.push(format!("{}: {}", vibe.label(), vibe.tagline()));
    }
    if let Some(emotion) = profile.vehicle_emotion {
        lines.push(format!("{}: {}", emotion.label(), emotion.tagline()));
    }
    if let Some(style) = profile.spending_style {
        lines.push(format!("{}: {}", style.label(), style.tagline()));
    }
    let narrative = profile.future_chapter_narrative.trim();
    if !narrative.is_empty() {
        lines.push(format!("Next chapter: {narrative}"));
    }
    lines
}

fn vehicle_line(recommendation: &Recommendation) -> String {
    let vehicle = &recommendation.vehicle;
    let mut line = format!(
        "{} {} {} ({}) at {}, match {:.0}%, affinity {}",
        vehicle.year,
        vehicle.name(),
        vehicle.trim,
        vehicle.fuel_type.label(),
        format_currency(vehicle.msrp),
        recommendation.fit.score * 100.0,
        recommendation.affinity
    );
    let reasons = recommendation.fit.reason_labels();
    if !reasons.is_empty() {
        line.push_str(&format!(" [{}]", reasons.join("; ")));
    }
    line
}
