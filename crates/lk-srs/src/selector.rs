//! Card selection for review sessions.
//!
//! Due cards are ranked by an urgency weight that combines how late the card
//! is, how short its current success streak is, and how slowly it has been
//! answered. The most urgent `limit` cards are shuffled so sessions do not
//! drill in a predictable order; everything after them keeps its ranking.

use chrono::{DateTime, Duration, TimeDelta, Utc};
use rand::{Rng, seq::SliceRandom};
use serde::{Deserialize, Serialize};

use crate::card::Card;

/// Session size used when the caller does not ask for one.
pub const DEFAULT_REVIEW_LIMIT: usize = 20;

const MICROS_PER_DAY: f64 = 86_400_000_000.0;

/// Coefficients of the urgency weight.
///
/// ```text
/// weight = days_overdue * overdue_weight
///        + 1 / (repetition_count + 0.5) * repetition_weight
///        + average_review_time * review_time_weight
/// ```
///
/// A card that was never scheduled counts as `unreviewed_overdue_days` late.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Size of the shuffled head of the session
    pub limit: usize,
    /// Weight per day past `next_review`
    pub overdue_weight: f64,
    /// Scale of the short-streak bonus `1 / (repetition_count + 0.5)`
    pub repetition_weight: f64,
    /// Weight per second of average answer time
    pub review_time_weight: f64,
    /// Days a never scheduled card counts as overdue
    pub unreviewed_overdue_days: i64,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_REVIEW_LIMIT,
            overdue_weight: 1.5,
            repetition_weight: 1.0,
            review_time_weight: 0.1,
            unreviewed_overdue_days: 365,
        }
    }
}

impl SelectorConfig {
    /// Urgency of a due card at `now`. Higher is more urgent.
    pub fn weight(&self, card: &Card, now: DateTime<Utc>) -> f64 {
        let scheduled = card
            .next_review
            .unwrap_or_else(|| now - Duration::days(self.unreviewed_overdue_days));
        let days_overdue = fractional_days(now - scheduled);

        days_overdue * self.overdue_weight
            + (1.0 / (f64::from(card.repetition_count) + 0.5)) * self.repetition_weight
            + card.average_review_time * self.review_time_weight
    }
}

/// Stateless selector carrying its weighting configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Selector {
    config: SelectorConfig,
}

impl Selector {
    /// Selector ranking with `config`.
    pub const fn new(config: SelectorConfig) -> Self {
        Self { config }
    }

    /// Weights and limit in use.
    pub const fn config(&self) -> &SelectorConfig {
        &self.config
    }

    /// Order the due cards of `cards` for a review session.
    ///
    /// Cards that are not due at `now` are left out. The remaining cards are
    /// sorted by descending [`SelectorConfig::weight`] (ties keep input order),
    /// the first `limit` of them are shuffled with `rng`, and the rest follow
    /// in weight order. No due card is ever dropped, whatever the limit.
    pub fn select<'a, C, R>(&self, cards: &'a [C], now: DateTime<Utc>, rng: &mut R) -> Vec<&'a C>
    where
        C: AsRef<Card>,
        R: Rng + ?Sized,
    {
        let mut weighted: Vec<(f64, &'a C)> = cards
            .iter()
            .filter(|c| c.as_ref().is_due(now))
            .map(|c| {
                let weight = self.config.weight(c.as_ref(), now);
                tracing::trace!(card_id = %c.as_ref().id, weight, "weighted due card");
                (weight, c)
            })
            .collect();

        // Stable, so equal weights stay in input order
        weighted.sort_by(|a, b| b.0.total_cmp(&a.0));

        let head = self.config.limit.min(weighted.len());
        weighted[..head].shuffle(rng);

        tracing::debug!(
            total = cards.len(),
            due = weighted.len(),
            limit = self.config.limit,
            "selected cards for review"
        );

        weighted.into_iter().map(|(_, c)| c).collect()
    }
}

/// Order the due cards of one deck for a review session.
///
/// Shorthand for [`Selector::select`] with the default weights and the given
/// `limit`.
pub fn select_for_review<'a, C, R>(
    cards: &'a [C],
    limit: usize,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Vec<&'a C>
where
    C: AsRef<Card>,
    R: Rng + ?Sized,
{
    Selector::new(SelectorConfig {
        limit,
        ..SelectorConfig::default()
    })
    .select(cards, now, rng)
}

/// Urgency weight of `card` at `now` with the default coefficients.
pub fn review_weight(card: &Card, now: DateTime<Utc>) -> f64 {
    SelectorConfig::default().weight(card, now)
}

fn fractional_days(delta: TimeDelta) -> f64 {
    match delta.num_microseconds() {
        Some(us) => us as f64 / MICROS_PER_DAY,
        // Only reachable for spans of more than ~290k years
        None => delta.num_seconds() as f64 / 86_400.0,
    }
}
