//! Aggregate numbers for dashboards.
//!
//! Accuracy values are percentages in `0.0..=100.0` and are `0.0` when there
//! is nothing to measure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{deck::Deck, session::LearningSession};

/// Interval, in days, from which a card counts as mature.
pub const MATURE_INTERVAL_DAYS: u32 = 21;

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// Outcome of a single session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Answers recorded
    pub reviewed: usize,
    /// Correct answers
    pub correct: usize,
    /// Wrong answers
    pub incorrect: usize,
    /// Percentage of correct answers
    pub accuracy: f64,
    /// Seconds spent answering
    pub total_time: f64,
    /// Mean seconds per answer
    pub average_time: f64,
}

impl SessionSummary {
    /// Summarize the reviews recorded so far.
    pub fn from_session(session: &LearningSession) -> Self {
        let reviews = session.reviews();
        let reviewed = reviews.len();
        let correct = reviews.iter().filter(|r| r.is_correct).count();
        let total_time: f64 = reviews.iter().map(|r| r.time_taken).sum();

        Self {
            reviewed,
            correct,
            incorrect: reviewed - correct,
            accuracy: percentage(correct, reviewed),
            total_time,
            average_time: if reviewed == 0 {
                0.0
            } else {
                total_time / reviewed as f64
            },
        }
    }
}

/// Totals across everything a learner owns
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LearnerStats {
    /// Cards across all decks
    pub total_cards: usize,
    /// Answers across all sessions
    pub total_reviews: usize,
    /// Sessions, whatever their status
    pub total_sessions: usize,
    /// Percentage of correct answers across all sessions
    pub average_accuracy: f64,
}

impl LearnerStats {
    /// Totals over `decks` and `sessions`.
    pub fn from_sessions(decks: &[Deck], sessions: &[LearningSession]) -> Self {
        let total_reviews: usize = sessions.iter().map(LearningSession::reviews_count).sum();
        let correct = sessions
            .iter()
            .flat_map(|s| s.reviews())
            .filter(|r| r.is_correct)
            .count();

        Self {
            total_cards: decks.iter().map(Deck::len).sum(),
            total_reviews,
            total_sessions: sessions.len(),
            average_accuracy: percentage(correct, total_reviews),
        }
    }
}

/// Scheduling state of a deck at a given instant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeckStats {
    /// Cards in the deck
    pub cards: usize,
    /// Cards due at the instant of computation
    pub due: usize,
    /// Cards never reviewed
    pub new: usize,
    /// Cards scheduled at least [`MATURE_INTERVAL_DAYS`] apart
    pub mature: usize,
    /// Mean ease factor, `0.0` for an empty deck
    pub mean_ease_factor: f64,
}

impl DeckStats {
    /// Count the cards of `deck` as of `now`.
    pub fn compute(deck: &Deck, now: DateTime<Utc>) -> Self {
        let cards = deck.len();
        let ease_sum: f64 = deck.cards.iter().map(|f| f.card.ease_factor).sum();

        Self {
            cards,
            due: deck.due_count(now),
            new: deck.cards.iter().filter(|f| f.card.is_new()).count(),
            mature: deck
                .cards
                .iter()
                .filter(|f| f.card.interval >= MATURE_INTERVAL_DAYS)
                .count(),
            mean_ease_factor: if cards == 0 {
                0.0
            } else {
                ease_sum / cards as f64
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(percentage(3, 4), 75.0);
        assert_eq!(percentage(4, 4), 100.0);
    }

    #[test]
    fn test_empty_deck_stats() {
        let stats = DeckStats::compute(&Deck::new("Empty"), Utc::now());
        assert_eq!(stats.cards, 0);
        assert_eq!(stats.due, 0);
        assert_eq!(stats.mean_ease_factor, 0.0);
    }

    #[test]
    fn test_deck_stats_counts() {
        let now = Utc::now();
        let mut deck = Deck::new("Spanish Basics");
        let hola = deck.add_card("hello", "hola");
        let adios = deck.add_card("goodbye", "adiós");
        deck.add_card("thanks", "gracias");

        if let Some(f) = deck.get_mut(hola) {
            f.card.interval = 30;
            f.card.ease_factor = 2.8;
            f.card.last_reviewed = Some(now - Duration::days(30));
            f.card.next_review = Some(now + Duration::days(1));
        }
        if let Some(f) = deck.get_mut(adios) {
            f.card.interval = 6;
            f.card.ease_factor = 2.2;
            f.card.last_reviewed = Some(now - Duration::days(6));
            f.card.next_review = Some(now);
        }

        let stats = DeckStats::compute(&deck, now);
        assert_eq!(stats.cards, 3);
        assert_eq!(stats.due, 2);
        assert_eq!(stats.new, 1);
        assert_eq!(stats.mature, 1);
        assert!((stats.mean_ease_factor - 2.5).abs() < 1e-9);
    }
}
