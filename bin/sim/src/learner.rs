//! Simulated learner answering review prompts.

use lk_session::Answer;
use lk_srs::Card;
use rand::Rng;

/// Learner whose recall improves with every correct answer in a streak.
#[derive(Debug, Clone, Copy)]
pub struct Learner {
    recall_probability: f64,
    mean_answer_seconds: f64,
}

impl Learner {
    /// Highest chance of recalling any card
    const MAX_RECALL: f64 = 0.99;
    /// Recall gained per consecutive correct review
    const STREAK_BONUS: f64 = 0.02;

    pub const fn new(recall_probability: f64, mean_answer_seconds: f64) -> Self {
        Self {
            recall_probability,
            mean_answer_seconds,
        }
    }

    fn recall_chance(&self, card: &Card) -> f64 {
        (self.recall_probability + Self::STREAK_BONUS * f64::from(card.repetition_count))
            .min(Self::MAX_RECALL)
    }

    /// Answer `card`, drawing correctness and latency from `rng`.
    pub fn answer<R: Rng + ?Sized>(&self, card: &Card, rng: &mut R) -> Answer {
        let is_correct = rng.gen_bool(self.recall_chance(card));

        // Misses take longer: the learner searches before giving up
        let spread = rng.gen_range(0.5..1.5);
        let slowdown = if is_correct { 1.0 } else { 1.5 };
        let time_taken = (self.mean_answer_seconds * spread * slowdown * 10.0).round() / 10.0;

        Answer::new(card.id, is_correct, time_taken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_recall_chance_is_capped() {
        let learner = Learner::new(0.9, 8.0);
        let card = Card {
            repetition_count: 50,
            ..Card::default()
        };
        assert_eq!(learner.recall_chance(&card), 0.99);
        assert_eq!(learner.recall_chance(&Card::default()), 0.9);
    }

    #[test]
    fn test_answers_stay_in_range() {
        let learner = Learner::new(0.85, 8.0);
        let card = Card::default();
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..200 {
            let answer = learner.answer(&card, &mut rng);
            assert_eq!(answer.card_id, card.id);
            assert!(answer.time_taken >= 4.0 && answer.time_taken <= 18.0);
        }
    }

    #[test]
    fn test_certain_recall() {
        let learner = Learner::new(1.0, 5.0);
        let mut rng = StdRng::seed_from_u64(2);
        assert!(learner.answer(&Card::default(), &mut rng).is_correct);
    }
}
