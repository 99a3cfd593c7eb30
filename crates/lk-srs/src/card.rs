//! Scheduling state of a single card.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Ease factor given to a freshly created card.
pub const DEFAULT_EASE_FACTOR: f64 = 2.5;

/// Lowest ease factor a card can reach.
pub const MIN_EASE_FACTOR: f64 = 1.3;

/// Scheduling state of a single flashcard.
///
/// The card content (front/back) is owned by the caller; this record only
/// carries what the scheduler reads and writes. Once created, the scheduling
/// fields are mutated exclusively by [`crate::evaluate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    /// Identifier assigned by the owner of the card
    pub id: Uuid,
    /// Days until the next review after the last successful one (0 = never reviewed)
    pub interval: u32,
    /// Interval growth multiplier, never below [`MIN_EASE_FACTOR`]
    pub ease_factor: f64,
    /// Consecutive correct reviews since the last failure
    pub repetition_count: u32,
    /// When the card was last evaluated
    pub last_reviewed: Option<DateTime<Utc>>,
    /// When the card becomes due; `None` means due immediately
    pub next_review: Option<DateTime<Utc>>,
    /// Sum of the rounded answer times of every review
    pub total_review_time: i64,
    /// `total_review_time` divided by the number of review attempts
    pub average_review_time: f64,
    /// Lifetime correct answers
    pub correct_count: u32,
    /// Lifetime incorrect answers
    pub incorrect_count: u32,
}

impl Card {
    /// Create a never-reviewed card with default scheduling state.
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            interval: 0,
            ease_factor: DEFAULT_EASE_FACTOR,
            repetition_count: 0,
            last_reviewed: None,
            next_review: None,
            total_review_time: 0,
            average_review_time: 0.0,
            correct_count: 0,
            incorrect_count: 0,
        }
    }

    /// A card is due when it was never scheduled or its review instant has passed.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_review.is_none_or(|next| next <= now)
    }

    /// Whether the card has never been evaluated.
    pub const fn is_new(&self) -> bool {
        self.last_reviewed.is_none()
    }

    /// Attempts used as the divisor of the average review time.
    ///
    /// This is `repetition_count + incorrect_count`, so correct answers from
    /// before the last failure are not counted.
    pub const fn total_attempts(&self) -> u32 {
        self.repetition_count + self.incorrect_count
    }
}

impl Default for Card {
    fn default() -> Self {
        Self::new(Uuid::new_v4())
    }
}

impl AsRef<Self> for Card {
    fn as_ref(&self) -> &Self {
        self
    }
}
