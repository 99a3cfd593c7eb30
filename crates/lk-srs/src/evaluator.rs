//! Review evaluation using a latency-scored SM-2 update.
//!
//! A failed review is a hard reset: the streak goes back to zero and the
//! card is due again the next day, ease factor untouched. A correct review
//! is graded by comparing the answer time with the card's own average:
//!
//! * notably faster than usual (`< 0.75 × average`): [`Quality::Perfect`] (q = 5)
//! * notably slower than usual (`> 1.25 × average`): [`Quality::Hesitant`] (q = 2)
//! * otherwise, or with no history yet: [`Quality::Good`] (q = 4)
//!
//! The grade then drives the classic SM-2 ease adjustment and the interval
//! grows 1 day → 6 days → `interval × ease`, capped at
//! [`MAX_INTERVAL_DAYS`].

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::card::{Card, MIN_EASE_FACTOR};

/// Longest interval the evaluator schedules, in days (about a century).
pub const MAX_INTERVAL_DAYS: u32 = 36_500;

/// Recall quality of a correct answer on the SM-2 0-5 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quality {
    /// Correct but notably slower than usual (q = 2)
    Hesitant,
    /// Correct at a typical pace (q = 4)
    Good,
    /// Correct and notably faster than usual (q = 5)
    Perfect,
}

impl Quality {
    /// Numeric SM-2 grade.
    pub const fn score(self) -> u8 {
        match self {
            Self::Hesitant => 2,
            Self::Good => 4,
            Self::Perfect => 5,
        }
    }

    /// Grade a correct answer from its latency, using the default thresholds.
    pub fn from_latency(time_taken: f64, average_review_time: f64) -> Self {
        EvaluatorConfig::default().quality(time_taken, average_review_time)
    }

    /// SM-2 ease adjustment for this grade, before the floor is applied.
    pub fn ease_delta(self) -> f64 {
        let miss = f64::from(5 - self.score());
        0.1 - miss * (0.08 + miss * 0.02)
    }
}

/// Thresholds of the evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluatorConfig {
    /// Answers faster than `average × fast_ratio` are graded [`Quality::Perfect`]
    pub fast_ratio: f64,
    /// Answers slower than `average × slow_ratio` are graded [`Quality::Hesitant`]
    pub slow_ratio: f64,
    /// Floor of the ease factor after any correct answer
    pub min_ease_factor: f64,
    /// Interval after the first correct answer of a streak, in days
    pub first_interval: u32,
    /// Interval after the second correct answer of a streak, in days
    pub second_interval: u32,
    /// Days until a failed card is due again
    pub relearn_interval: u32,
    /// Upper bound of every scheduled interval, in days
    pub max_interval: u32,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            fast_ratio: 0.75,
            slow_ratio: 1.25,
            min_ease_factor: MIN_EASE_FACTOR,
            first_interval: 1,
            second_interval: 6,
            relearn_interval: 1,
            max_interval: MAX_INTERVAL_DAYS,
        }
    }
}

impl EvaluatorConfig {
    /// Grade a correct answer against the card's average review time.
    ///
    /// Without an average to compare against the answer is [`Quality::Good`].
    pub fn quality(&self, time_taken: f64, average_review_time: f64) -> Quality {
        if average_review_time > 0.0 {
            if time_taken < average_review_time * self.fast_ratio {
                return Quality::Perfect;
            }
            if time_taken > average_review_time * self.slow_ratio {
                return Quality::Hesitant;
            }
        }
        Quality::Good
    }

    /// Ease factor after a correct answer of quality `q`, floored.
    pub fn next_ease_factor(&self, ease_factor: f64, q: Quality) -> f64 {
        (ease_factor + q.ease_delta()).max(self.min_ease_factor)
    }

    /// `interval × ease`, rounded half to even and capped at `max_interval`.
    pub fn grown_interval(&self, interval: u32, ease_factor: f64) -> u32 {
        let grown = (f64::from(interval) * ease_factor).round_ties_even();
        grown.clamp(0.0, f64::from(self.max_interval)) as u32
    }
}

/// What a single evaluation did to a card.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Grade of a correct answer, `None` when the answer was wrong
    pub quality: Option<Quality>,
    /// Days until the next review
    pub interval: u32,
    /// Ease factor after the update
    pub ease_factor: f64,
    /// When the card is due next, saturating at the latest representable instant
    pub next_review: DateTime<Utc>,
}

/// Stateless evaluator carrying its thresholds.
///
/// Serializes as its [`EvaluatorConfig`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Evaluator {
    config: EvaluatorConfig,
}

impl Evaluator {
    /// Evaluator using `config` for grading and intervals.
    pub const fn new(config: EvaluatorConfig) -> Self {
        Self { config }
    }

    /// Thresholds this evaluator grades with.
    pub const fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Apply one review outcome to `card` at `now`.
    ///
    /// The average review time is refreshed *before* the counters move, so
    /// this review's time is divided by the attempt count from before it, and
    /// that average is what the grade compares against.
    pub fn evaluate(
        &self,
        card: &mut Card,
        is_correct: bool,
        time_taken: f64,
        now: DateTime<Utc>,
    ) -> Evaluation {
        card.last_reviewed = Some(now);

        card.total_review_time = card
            .total_review_time
            .saturating_add(time_taken.round_ties_even() as i64);
        let attempts = card.total_attempts();
        if attempts > 0 {
            card.average_review_time = card.total_review_time as f64 / f64::from(attempts);
        }

        let quality = if is_correct {
            card.correct_count += 1;

            let q = self.config.quality(time_taken, card.average_review_time);
            card.ease_factor = self.config.next_ease_factor(card.ease_factor, q);
            card.repetition_count += 1;

            card.interval = match card.repetition_count {
                1 => self.config.first_interval.min(self.config.max_interval),
                2 => self.config.second_interval.min(self.config.max_interval),
                _ => self.config.grown_interval(card.interval, card.ease_factor),
            };
            Some(q)
        } else {
            card.incorrect_count += 1;
            card.repetition_count = 0;
            card.interval = self.config.relearn_interval.min(self.config.max_interval);
            None
        };

        let next_review = now
            .checked_add_signed(Duration::days(i64::from(card.interval)))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        card.next_review = Some(next_review);

        tracing::debug!(
            card_id = %card.id,
            is_correct,
            quality = quality.map(Quality::score),
            interval = card.interval,
            ease_factor = card.ease_factor,
            "evaluated review"
        );

        Evaluation {
            quality,
            interval: card.interval,
            ease_factor: card.ease_factor,
            next_review,
        }
    }
}

/// Apply one review outcome to `card` at `now` with the default thresholds.
///
/// `time_taken` must use the same unit as the card's `total_review_time`
/// (seconds throughout this workspace). It is not validated.
pub fn evaluate(card: &mut Card, is_correct: bool, time_taken: f64, now: DateTime<Utc>) -> Evaluation {
    Evaluator::default().evaluate(card, is_correct, time_taken, now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 23, 12, 0, 0).unwrap()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_quality_thresholds() {
        // No history
        assert_eq!(Quality::from_latency(1.0, 0.0), Quality::Good);
        assert_eq!(Quality::from_latency(100.0, 0.0), Quality::Good);

        assert_eq!(Quality::from_latency(7.4, 10.0), Quality::Perfect);
        assert_eq!(Quality::from_latency(7.5, 10.0), Quality::Good);
        assert_eq!(Quality::from_latency(12.5, 10.0), Quality::Good);
        assert_eq!(Quality::from_latency(12.6, 10.0), Quality::Hesitant);
    }

    #[test]
    fn test_ease_deltas() {
        assert!(approx(Quality::Perfect.ease_delta(), 0.1));
        assert_eq!(Quality::Good.ease_delta(), 0.0);
        assert!(approx(Quality::Hesitant.ease_delta(), -0.32));
    }

    #[test]
    fn test_failure_from_new_card() {
        let mut card = Card::default();
        let result = evaluate(&mut card, false, 5.0, now());

        assert_eq!(result.quality, None);
        assert_eq!(card.repetition_count, 0);
        assert_eq!(card.interval, 1);
        assert_eq!(card.incorrect_count, 1);
        assert_eq!(card.correct_count, 0);
        assert_eq!(card.ease_factor, 2.5);
        assert_eq!(card.next_review, Some(now() + Duration::days(1)));
        assert_eq!(card.last_reviewed, Some(now()));
        assert_eq!(card.total_review_time, 5);
        // No prior attempts, average left alone
        assert_eq!(card.average_review_time, 0.0);
    }

    #[test]
    fn test_failure_resets_mature_card() {
        let mut card = Card {
            interval: 40,
            ease_factor: 2.76,
            repetition_count: 6,
            correct_count: 9,
            incorrect_count: 2,
            total_review_time: 64,
            average_review_time: 8.0,
            next_review: Some(now()),
            last_reviewed: Some(now() - Duration::days(40)),
            ..Card::default()
        };

        evaluate(&mut card, false, 16.0, now());

        assert_eq!(card.repetition_count, 0);
        assert_eq!(card.interval, 1);
        assert_eq!(card.incorrect_count, 3);
        assert_eq!(card.correct_count, 9);
        assert_eq!(card.ease_factor, 2.76);
        assert_eq!(card.next_review, Some(now() + Duration::days(1)));
        // (64 + 16) / (6 + 2), divisor taken before the reset
        assert_eq!(card.total_review_time, 80);
        assert_eq!(card.average_review_time, 10.0);
    }

    #[test]
    fn test_first_correct_review() {
        let mut card = Card::default();
        let result = evaluate(&mut card, true, 10.0, now());

        assert_eq!(result.quality, Some(Quality::Good));
        assert_eq!(card.ease_factor, 2.5);
        assert_eq!(card.repetition_count, 1);
        assert_eq!(card.correct_count, 1);
        assert_eq!(card.interval, 1);
        assert_eq!(card.next_review, Some(now() + Duration::days(1)));
    }

    #[test]
    fn test_second_correct_review() {
        let mut card = Card::default();
        evaluate(&mut card, true, 10.0, now());

        let later = now() + Duration::days(1);
        let result = evaluate(&mut card, true, 10.0, later);

        // Average is (10 + 10) / 1, so 10 seconds counts as fast
        assert_eq!(card.average_review_time, 20.0);
        assert_eq!(result.quality, Some(Quality::Perfect));
        assert!(approx(card.ease_factor, 2.6));
        assert_eq!(card.repetition_count, 2);
        assert_eq!(card.interval, 6);
        assert_eq!(card.next_review, Some(later + Duration::days(6)));
    }

    #[test]
    fn test_third_correct_review_uses_ease() {
        let mut card = Card {
            interval: 6,
            ease_factor: 2.5,
            repetition_count: 2,
            correct_count: 2,
            total_review_time: 10,
            ..Card::default()
        };

        // Average (10 + 10) / 2 = 10, on pace
        let result = evaluate(&mut card, true, 10.0, now());

        assert_eq!(result.quality, Some(Quality::Good));
        assert_eq!(card.ease_factor, 2.5);
        assert_eq!(card.repetition_count, 3);
        assert_eq!(card.interval, 15);
        assert_eq!(card.next_review, Some(now() + Duration::days(15)));
    }

    #[test]
    fn test_bootstrap_then_growth() {
        let mut card = Card::default();
        let mut at = now();

        let intervals: Vec<u32> = (0..3)
            .map(|_| {
                let result = evaluate(&mut card, true, 10.0, at);
                at = result.next_review;
                result.interval
            })
            .collect();

        assert_eq!(intervals[0], 1);
        assert_eq!(intervals[1], 6);
        assert_eq!(
            intervals[2],
            (6.0 * card.ease_factor).round_ties_even() as u32
        );
    }

    #[test]
    fn test_slow_answers_never_push_ease_below_floor() {
        let mut card = Card {
            total_review_time: 10,
            repetition_count: 2,
            ease_factor: 2.5,
            interval: 6,
            ..Card::default()
        };

        let mut at = now();
        for _ in 0..12 {
            // Three times everything so far is well past 1.25x the refreshed average
            let slow = card.total_review_time as f64 * 3.0;
            let result = evaluate(&mut card, true, slow, at);
            assert_eq!(result.quality, Some(Quality::Hesitant));
            assert!(card.ease_factor >= MIN_EASE_FACTOR);
            at = result.next_review;
        }
        assert_eq!(card.ease_factor, MIN_EASE_FACTOR);
    }

    #[test]
    fn test_huge_interval_is_capped() {
        let mut card = Card {
            interval: 100_000_000,
            repetition_count: 3,
            ..Card::default()
        };

        let result = evaluate(&mut card, true, 0.0, now());

        assert_eq!(result.interval, MAX_INTERVAL_DAYS);
        assert_eq!(card.interval, MAX_INTERVAL_DAYS);
        assert_eq!(
            result.next_review,
            now() + Duration::days(i64::from(MAX_INTERVAL_DAYS))
        );
    }

    #[test]
    fn test_next_review_saturates_at_latest_instant() {
        let evaluator = Evaluator::new(EvaluatorConfig {
            max_interval: u32::MAX,
            ..EvaluatorConfig::default()
        });
        let mut card = Card {
            interval: u32::MAX,
            repetition_count: 3,
            ..Card::default()
        };

        let result = evaluator.evaluate(&mut card, true, 0.0, now());

        assert_eq!(card.interval, u32::MAX);
        assert_eq!(result.next_review, DateTime::<Utc>::MAX_UTC);
        assert_eq!(card.next_review, Some(DateTime::<Utc>::MAX_UTC));
    }

    #[test]
    fn test_time_is_rounded_half_to_even() {
        let mut card = Card::default();
        evaluate(&mut card, true, 2.5, now());
        assert_eq!(card.total_review_time, 2);

        evaluate(&mut card, true, 3.5, now());
        assert_eq!(card.total_review_time, 6);
    }

    #[test]
    fn test_negative_time_is_accepted() {
        let mut card = Card::default();
        let result = evaluate(&mut card, true, -4.0, now());

        assert_eq!(card.total_review_time, -4);
        assert_eq!(result.quality, Some(Quality::Good));
    }

    #[test]
    fn test_failure_after_streak_restarts_bootstrap() {
        let mut card = Card::default();
        let mut at = now();
        for _ in 0..3 {
            at = evaluate(&mut card, true, 8.0, at).next_review;
        }
        let ease = card.ease_factor;

        at = evaluate(&mut card, false, 8.0, at).next_review;
        assert_eq!(card.ease_factor, ease);

        let result = evaluate(&mut card, true, 8.0, at);
        assert_eq!(card.repetition_count, 1);
        assert_eq!(result.interval, 1);
    }
}
