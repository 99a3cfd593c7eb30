//! Runs simulated study days against a synthetic deck and logs how the
//! scheduler spreads the reviews out.

mod config;
mod learner;
mod logging;
mod metrics;

use anyhow::Context;
use chrono::{Duration, Utc};
use lk_session::{Deck, DeckStats, LearnerStats, LearningSession, SessionSummary};
use lk_srs::{Clock, FixedClock};
use rand::{SeedableRng, rngs::StdRng};

use crate::{config::SimConfig, learner::Learner};

fn build_deck(size: usize) -> Deck {
    let mut deck = Deck::new("Simulated vocabulary");
    for i in 1..=size {
        deck.add_card(format!("term {i}"), format!("definition {i}"));
    }
    deck
}

fn main() -> anyhow::Result<()> {
    // Load configuration from environment variables
    dotenvy::dotenv().ok();
    let config = SimConfig::from_env().context("failed to load simulation config")?;

    logging::init_tracing(config.environment).context("failed to install tracing subscriber")?;
    let metrics_handle = metrics::init_metrics().context("failed to install metrics recorder")?;

    let seed = config.seed.unwrap_or_else(rand::random);
    tracing::info!(
        seed,
        days = config.days,
        deck_size = config.deck_size,
        session_limit = config.session_limit,
        "Starting simulation"
    );

    let mut rng = StdRng::seed_from_u64(seed);
    let mut clock = FixedClock::new(Utc::now());
    let mut deck = build_deck(config.deck_size);
    let learner = Learner::new(config.recall_probability, config.mean_answer_seconds);
    let mut sessions = Vec::with_capacity(config.days as usize);

    for day in 1..=config.days {
        let day_start = clock.now();
        let mut session = LearningSession::start(&deck, config.session_limit, &clock, &mut rng);

        while session.reviews_count() < config.session_limit {
            let Some(card_id) = session.next_card() else {
                break;
            };
            let card = deck
                .get(card_id)
                .map(|f| f.card.clone())
                .with_context(|| format!("queued card {card_id} missing from deck"))?;

            let answer = learner.answer(&card, &mut rng);
            clock.advance(Duration::milliseconds((answer.time_taken * 1000.0) as i64));
            session.submit(&mut deck, answer, &clock)?;
        }

        session.complete(&clock)?;

        let summary = SessionSummary::from_session(&session);
        tracing::info!(
            day,
            reviewed = summary.reviewed,
            accuracy = summary.accuracy,
            average_time = summary.average_time,
            left_over = session.remaining(),
            "Study day finished"
        );
        sessions.push(session);

        clock.set(day_start + Duration::days(1));
    }

    let deck_stats = DeckStats::compute(&deck, clock.now());
    let learner_stats = LearnerStats::from_sessions(std::slice::from_ref(&deck), &sessions);
    tracing::info!(
        due = deck_stats.due,
        new = deck_stats.new,
        mature = deck_stats.mature,
        mean_ease_factor = deck_stats.mean_ease_factor,
        total_reviews = learner_stats.total_reviews,
        average_accuracy = learner_stats.average_accuracy,
        "Simulation finished"
    );
    tracing::debug!("Metrics snapshot:\n{}", metrics_handle.render());

    Ok(())
}
