use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};
use toyota_nexus::catalog::{BodyStyle, FuelType, Vehicle, VehicleFilter, VehicleId};
use toyota_nexus::config::NexusConfig;
use toyota_nexus::error::AppError;
use toyota_nexus::finance::{
    apr_to_money_factor, estimate_finance, estimate_lease, format_currency, format_monthly,
    percent_to_fraction,
};
use toyota_nexus::matching::{MatchResult, Recommendation};
use toyota_nexus::profile::{
    BankLinkState, ProfileContext, ProfileQuiz, QuizError, QuizStep, QuizTransition,
    SpendingStyle, VehicleEmotion, WeekendVibe,
};
use tracing::info;

use crate::infra::{matching_state, read_profile};

#[derive(Subcommand, Debug)]
pub(crate) enum FinanceCommand {
    /// Amortized purchase loan
    Loan(LoanArgs),
    /// Closed-end lease
    Lease(LeaseArgs),
}

#[derive(Args, Debug)]
pub(crate) struct LoanArgs {
    /// Vehicle price in dollars
    #[arg(long)]
    pub(crate) msrp: f64,
    /// Annual percentage rate, e.g. 5.5
    #[arg(long, default_value_t = 6.0)]
    pub(crate) apr: f64,
    /// Loan length in months
    #[arg(long, default_value_t = 60)]
    pub(crate) term: u32,
    #[arg(long, default_value_t = 0.0)]
    pub(crate) down: f64,
}

#[derive(Args, Debug)]
pub(crate) struct LeaseArgs {
    #[arg(long)]
    pub(crate) msrp: f64,
    /// Residual value as a percentage of MSRP, e.g. 58
    #[arg(long, default_value_t = 60.0)]
    pub(crate) residual: f64,
    /// Money factor; derived from --apr when omitted
    #[arg(long, conflicts_with = "apr")]
    pub(crate) money_factor: Option<f64>,
    /// APR used to derive the money factor
    #[arg(long, default_value_t = 6.0)]
    pub(crate) apr: f64,
    #[arg(long, default_value_t = 36)]
    pub(crate) term: u32,
    #[arg(long, default_value_t = 0.0)]
    pub(crate) down: f64,
}

#[derive(Args, Debug)]
pub(crate) struct MatchArgs {
    /// Catalog id, e.g. camry-se-2025
    #[arg(long)]
    pub(crate) vehicle: String,
    /// Profile JSON file holding the preferences to score against
    #[arg(long)]
    pub(crate) profile: PathBuf,
}

#[derive(Args, Debug)]
pub(crate) struct RecommendArgs {
    /// Profile JSON file (defaults to NEXUS_PROFILE_PATH)
    #[arg(long)]
    pub(crate) profile: Option<PathBuf>,
    #[arg(long)]
    pub(crate) limit: Option<usize>,
}

#[derive(Args, Debug)]
pub(crate) struct QuizArgs {
    /// Profile JSON file to fill in (defaults to NEXUS_PROFILE_PATH)
    #[arg(long)]
    pub(crate) profile: Option<PathBuf>,
    /// Ask for the bank-link step as a signed-in user would
    #[arg(long)]
    pub(crate) signed_in: bool,
    /// Clear a completed profile before starting
    #[arg(long)]
    pub(crate) retake: bool,
}

#[derive(Subcommand, Debug)]
pub(crate) enum CatalogCommand {
    /// List vehicles passing the explore filters
    List(CatalogListArgs),
}

#[derive(Args, Debug)]
pub(crate) struct CatalogListArgs {
    /// gas, hybrid, or ev
    #[arg(long, value_parser = parse_fuel_type)]
    pub(crate) fuel_type: Option<FuelType>,
    /// sedan, suv, truck, minivan, hatchback, or coupe
    #[arg(long, value_parser = parse_body_style)]
    pub(crate) body_style: Option<BodyStyle>,
    #[arg(long)]
    pub(crate) price_min: Option<f64>,
    #[arg(long)]
    pub(crate) price_max: Option<f64>,
    /// Drop the default $20,000 to $60,000 window
    #[arg(long, conflicts_with_all = ["price_min", "price_max"])]
    pub(crate) any_price: bool,
    /// Case-insensitive search over name, trim, description, and features
    #[arg(long, short = 'q')]
    pub(crate) search: Option<String>,
}

fn parse_fuel_type(raw: &str) -> Result<FuelType, String> {
    FuelType::parse(raw).ok_or_else(|| format!("unknown fuel type '{raw}'"))
}

fn parse_body_style(raw: &str) -> Result<BodyStyle, String> {
    BodyStyle::parse(raw).ok_or_else(|| format!("unknown body style '{raw}'"))
}

pub(crate) fn run_finance(command: FinanceCommand) -> Result<(), AppError> {
    match command {
        FinanceCommand::Loan(args) => {
            let estimate = estimate_finance(args.msrp, args.apr, args.term, args.down)?;
            println!(
                "Finance {} at {}% APR over {} months ({} down)",
                format_currency(args.msrp),
                args.apr,
                args.term,
                format_currency(args.down)
            );
            println!("- Monthly payment: {}", format_monthly(estimate.monthly));
            println!("- Total cost: {}", format_monthly(estimate.total_cost));
            println!("- Total interest: {}", format_monthly(estimate.total_interest));
        }
        FinanceCommand::Lease(args) => {
            let money_factor = args
                .money_factor
                .unwrap_or_else(|| apr_to_money_factor(args.apr));
            let estimate = estimate_lease(
                args.msrp,
                percent_to_fraction(args.residual),
                money_factor,
                args.term,
                args.down,
            )?;
            println!(
                "Lease {} for {} months at {}% residual, money factor {:.5}",
                format_currency(args.msrp),
                args.term,
                args.residual,
                money_factor
            );
            println!("- Monthly payment: {}", format_monthly(estimate.monthly));
            println!("- Due at signing: {}", format_monthly(estimate.due_at_signing));
            println!("- Total cost: {}", format_monthly(estimate.total_cost));
        }
    }
    Ok(())
}

pub(crate) fn run_match(config: &NexusConfig, args: MatchArgs) -> Result<(), AppError> {
    let state = matching_state(config)?;
    let profile = read_profile(&args.profile)?;
    let vehicle = state.catalog.require(&VehicleId(args.vehicle))?;

    let result = state.engine.score(vehicle, &profile);
    render_match(vehicle, &result);
    Ok(())
}

pub(crate) fn run_recommend(config: &NexusConfig, args: RecommendArgs) -> Result<(), AppError> {
    let limit = args.limit.unwrap_or(config.recommendation_limit);
    if limit == 0 {
        return Err(AppError::InvalidInput(
            "limit must be at least 1".to_string(),
        ));
    }

    let state = matching_state(config)?;
    let path = args.profile.unwrap_or_else(|| config.profile_path.clone());
    let profile = read_profile(&path)?;

    if !profile.completed {
        println!("Profile is incomplete; showing the first {limit} vehicles unranked.");
    }
    let recommendations = state.engine.recommend(&state.catalog, &profile, limit);
    render_recommendations(&recommendations);
    Ok(())
}

pub(crate) fn run_quiz(config: &NexusConfig, args: QuizArgs) -> Result<(), AppError> {
    let path = args.profile.unwrap_or_else(|| config.profile_path.clone());
    let mut context = ProfileContext::load(&path)?;

    if context.is_completed() {
        if !args.retake {
            return Err(AppError::InvalidInput(format!(
                "profile at {} is already completed; pass --retake to start over",
                path.display()
            )));
        }
        context.reset();
    }

    let mut quiz = ProfileQuiz::resume(context.profile(), args.signed_in);
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    let outcome = run_quiz_session(&mut quiz, &mut context, &mut input, &mut output, Utc::now());
    context.save()?;

    match outcome? {
        QuizOutcome::Completed => {
            info!(path = %path.display(), "quiz completed");
            println!("\nProfile saved to {}.", path.display());
        }
        QuizOutcome::Abandoned => {
            println!(
                "\nQuiz stopped at step {}; answers so far saved to {}.",
                quiz.current_step().number(),
                path.display()
            );
        }
    }
    Ok(())
}

pub(crate) fn run_catalog(config: &NexusConfig, command: CatalogCommand) -> Result<(), AppError> {
    let CatalogCommand::List(args) = command;
    let state = matching_state(config)?;

    let defaults = if args.any_price {
        VehicleFilter::unbounded()
    } else {
        VehicleFilter::default()
    };
    let filter = VehicleFilter {
        fuel_type: args.fuel_type,
        body_style: args.body_style,
        price_min: args.price_min.unwrap_or(defaults.price_min),
        price_max: args.price_max.unwrap_or(defaults.price_max),
        search: args.search.unwrap_or_default(),
    };

    let vehicles = state.catalog.filter(&filter);
    if args.any_price {
        println!("{} vehicles", vehicles.len());
    } else {
        println!(
            "{} vehicles between {} and {}",
            vehicles.len(),
            format_currency(filter.price_min),
            format_currency(filter.price_max)
        );
    }
    for vehicle in vehicles {
        println!(
            "- {} | {} {} {} | {} | {} | {}",
            vehicle.id,
            vehicle.year,
            vehicle.name(),
            vehicle.trim,
            vehicle.body_style.label(),
            vehicle.fuel_type.label(),
            format_currency(vehicle.msrp)
        );
    }
    Ok(())
}

fn render_match(vehicle: &Vehicle, result: &MatchResult) {
    println!(
        "{} {} {}: match {:.0}%",
        vehicle.year,
        vehicle.name(),
        vehicle.trim,
        result.score * 100.0
    );
    for component in &result.components {
        println!(
            "- {:?} +{:.2}: {}",
            component.rule, component.weight, component.notes
        );
    }
    if result.reasons.is_empty() {
        println!("No matching reasons.");
    } else {
        println!("Reasons: {}", result.reason_labels().join("; "));
    }
}

fn render_recommendations(recommendations: &[Recommendation]) {
    for (rank, recommendation) in recommendations.iter().enumerate() {
        let vehicle = &recommendation.vehicle;
        println!(
            "{}. {} {} {} ({}) | affinity {} | match {:.0}%",
            rank + 1,
            vehicle.year,
            vehicle.name(),
            vehicle.trim,
            format_currency(vehicle.msrp),
            recommendation.affinity,
            recommendation.fit.score * 100.0
        );
        let reasons = recommendation.fit.reason_labels();
        if !reasons.is_empty() {
            println!("   {}", reasons.join("; "));
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum QuizOutcome {
    Completed,
    /// Input ended before the last step was confirmed.
    Abandoned,
}

/// Drive the quiz from line-based input. A blank line keeps the current
/// answer and `b` steps back.
pub(crate) fn run_quiz_session<R: BufRead, W: Write>(
    quiz: &mut ProfileQuiz,
    context: &mut ProfileContext,
    input: &mut R,
    output: &mut W,
    now: DateTime<Utc>,
) -> Result<QuizOutcome, AppError> {
    loop {
        let step = quiz.current_step();
        writeln!(
            output,
            "\n[{}/{}] {}",
            step.number(),
            QuizStep::TOTAL,
            step.prompt()
        )?;
        write_choices(step, output)?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(QuizOutcome::Abandoned);
        }
        let answer = line.trim();

        if answer.eq_ignore_ascii_case("b") || answer.eq_ignore_ascii_case("back") {
            quiz.back();
            continue;
        }
        if !answer.is_empty() {
            if let Err(message) = apply_answer(quiz, step, answer) {
                writeln!(output, "{message}")?;
                continue;
            }
        }

        match quiz.next(context, now) {
            Ok(QuizTransition::Advanced(_)) => {}
            Ok(QuizTransition::Completed) => return Ok(QuizOutcome::Completed),
            Err(err @ QuizError::Incomplete(_)) => writeln!(output, "{err}")?,
            Err(err) => return Err(err.into()),
        }
    }
}

fn write_choices<W: Write>(step: QuizStep, output: &mut W) -> io::Result<()> {
    let choices: Vec<(&str, &str)> = match step {
        QuizStep::WeekendVibe => WeekendVibe::ALL
            .iter()
            .map(|vibe| (vibe.label(), vibe.tagline()))
            .collect(),
        QuizStep::VehicleEmotion => VehicleEmotion::ALL
            .iter()
            .map(|emotion| (emotion.label(), emotion.tagline()))
            .collect(),
        QuizStep::SpendingStyle => SpendingStyle::ALL
            .iter()
            .map(|style| (style.label(), style.tagline()))
            .collect(),
        QuizStep::FutureChapter => {
            return writeln!(output, "  (at least 40 characters)");
        }
        QuizStep::Financials => {
            return writeln!(output, "  s) skip for now, l) already linked");
        }
    };

    for (index, (label, tagline)) in choices.iter().enumerate() {
        writeln!(output, "  {}) {label}: {tagline}", index + 1)?;
    }
    Ok(())
}

fn apply_answer(quiz: &mut ProfileQuiz, step: QuizStep, answer: &str) -> Result<(), String> {
    match step {
        QuizStep::WeekendVibe => {
            quiz.answers_mut().weekend_vibe = Some(pick(&WeekendVibe::ALL, answer)?)
        }
        QuizStep::VehicleEmotion => {
            quiz.answers_mut().vehicle_emotion = Some(pick(&VehicleEmotion::ALL, answer)?)
        }
        QuizStep::SpendingStyle => {
            quiz.answers_mut().spending_style = Some(pick(&SpendingStyle::ALL, answer)?)
        }
        QuizStep::FutureChapter => {
            quiz.answers_mut().future_chapter_narrative = answer.to_string();
        }
        QuizStep::Financials => {
            let state = match answer.to_ascii_lowercase().as_str() {
                "s" | "skip" => BankLinkState::Skipped,
                "l" | "linked" => BankLinkState::Linked,
                _ => return Err(format!("expected 's' or 'l', got '{answer}'")),
            };
            quiz.set_bank_link(state);
        }
    }
    Ok(())
}

fn pick<T: Copy>(options: &[T], answer: &str) -> Result<T, String> {
    answer
        .parse::<usize>()
        .ok()
        .and_then(|choice| choice.checked_sub(1))
        .and_then(|index| options.get(index).copied())
        .ok_or_else(|| format!("choose a number from 1 to {}", options.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::io::Cursor;

    const NARRATIVE: &str = "Moving out west and hauling climbing gear every weekend";

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 6, 8, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    fn run(
        quiz: &mut ProfileQuiz,
        context: &mut ProfileContext,
        script: &str,
    ) -> (QuizOutcome, String) {
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut output = Vec::new();
        let outcome =
            run_quiz_session(quiz, context, &mut input, &mut output, now()).expect("session runs");
        (outcome, String::from_utf8(output).expect("utf8 output"))
    }

    #[test]
    fn scripted_session_completes_profile() {
        let mut context = ProfileContext::new();
        let mut quiz = ProfileQuiz::new(false);

        let script = format!("2\n3\n2\n{NARRATIVE}\n\n");
        let (outcome, transcript) = run(&mut quiz, &mut context, &script);

        assert_eq!(outcome, QuizOutcome::Completed);
        let profile = context.profile();
        assert!(profile.completed);
        assert_eq!(profile.completed_at, Some(now()));
        assert_eq!(profile.weekend_vibe, Some(WeekendVibe::OutdoorEscape));
        assert_eq!(profile.vehicle_emotion, Some(VehicleEmotion::Freedom));
        assert_eq!(profile.spending_style, Some(SpendingStyle::MiniRoadTrip));
        assert_eq!(profile.future_chapter_narrative, NARRATIVE);
        assert!(transcript.contains("[1/5] What does your typical weekend look like?"));
        assert!(transcript.contains("[5/5]"));
    }

    #[test]
    fn invalid_and_short_answers_repeat_the_step() {
        let mut context = ProfileContext::new();
        let mut quiz = ProfileQuiz::new(false);

        let script = "9\n1\n1\n1\ntoo short\n";
        let (outcome, transcript) = run(&mut quiz, &mut context, script);

        assert_eq!(outcome, QuizOutcome::Abandoned);
        assert!(transcript.contains("choose a number from 1 to 4"));
        assert!(transcript.contains("step 4 is incomplete"));
        assert_eq!(quiz.current_step(), QuizStep::FutureChapter);
        assert!(!context.is_completed());
        assert_eq!(
            context.profile().spending_style,
            Some(SpendingStyle::HomeProject)
        );
    }

    #[test]
    fn back_returns_to_previous_question() {
        let mut context = ProfileContext::new();
        let mut quiz = ProfileQuiz::new(false);

        let (outcome, _) = run(&mut quiz, &mut context, "1\nb\n4\n");

        assert_eq!(outcome, QuizOutcome::Abandoned);
        assert_eq!(quiz.current_step(), QuizStep::VehicleEmotion);
        assert_eq!(context.profile().weekend_vibe, Some(WeekendVibe::HomeBase));
    }

    #[test]
    fn signed_in_user_answers_bank_step() {
        let mut context = ProfileContext::new();
        let mut quiz = ProfileQuiz::new(true);

        let script = format!("1\n1\n1\n{NARRATIVE}\n\nmaybe\nl\n");
        let (outcome, transcript) = run(&mut quiz, &mut context, &script);

        assert_eq!(outcome, QuizOutcome::Completed);
        assert!(transcript.contains("step 5 is incomplete"));
        assert!(transcript.contains("expected 's' or 'l', got 'maybe'"));
        assert_eq!(quiz.bank_link(), BankLinkState::Linked);
    }

    #[test]
    fn pick_maps_one_based_choices() {
        assert_eq!(pick(&WeekendVibe::ALL, "4"), Ok(WeekendVibe::HomeBase));
        assert!(pick(&WeekendVibe::ALL, "0").is_err());
        assert!(pick(&WeekendVibe::ALL, "five").is_err());
    }
}
