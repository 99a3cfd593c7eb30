//! Learning session lifecycle and answer handling.

use std::fmt;

use chrono::{DateTime, Utc};
use lk_srs::{Clock, Evaluator, Quality, Selector, SelectorConfig};
use metrics::{counter, histogram};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{deck::Deck, error::SessionError};

/// Lifecycle of a learning session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Accepting answers
    Active,
    /// Finished by the learner
    Completed,
    /// Left before the end
    Abandoned,
}

impl SessionStatus {
    /// Lowercase name, as used in metrics labels.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Abandoned => "abandoned",
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A learner's answer to one card
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    /// Card being answered
    pub card_id: Uuid,
    /// Whether the learner recalled the card
    pub is_correct: bool,
    /// Seconds spent before answering
    pub time_taken: f64,
    /// Self-assessed difficulty, 1 (easy) to 5 (hard)
    pub difficulty_rating: Option<u8>,
}

impl Answer {
    /// Answer without a difficulty rating.
    pub const fn new(card_id: Uuid, is_correct: bool, time_taken: f64) -> Self {
        Self {
            card_id,
            is_correct,
            time_taken,
            difficulty_rating: None,
        }
    }

    /// Attach a self-assessed difficulty rating.
    pub const fn with_difficulty(mut self, rating: u8) -> Self {
        self.difficulty_rating = Some(rating);
        self
    }
}

/// Record of one evaluated answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardReview {
    /// Reviewed card
    pub card_id: Uuid,
    /// Whether the answer was right
    pub is_correct: bool,
    /// Difficulty rating given with the answer
    pub difficulty_rating: Option<u8>,
    /// Seconds spent before answering
    pub time_taken: f64,
    /// Grade derived from latency, `None` for a wrong answer
    pub quality: Option<Quality>,
    /// Interval the card was scheduled with, in days
    pub interval: u32,
    /// When the answer was evaluated
    pub created_at: DateTime<Utc>,
}

/// One pass of a learner through the due cards of a deck.
///
/// The review order is fixed when the session starts. Each queued card can
/// be answered once; answering runs the evaluator on the deck's copy of the
/// card, so the caller only needs to persist the deck afterwards.
///
/// The evaluator settings are serialized with the session, so a restored
/// session grades the same way it did before.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningSession {
    id: Uuid,
    deck_id: Uuid,
    status: SessionStatus,
    started_at: DateTime<Utc>,
    ended_at: Option<DateTime<Utc>>,
    queue: Vec<Uuid>,
    reviews: Vec<CardReview>,
    #[serde(default)]
    evaluator: Evaluator,
}

impl LearningSession {
    /// Start a session over the cards of `deck` that are due now.
    ///
    /// The first `limit` most urgent cards are shuffled; the rest of the due
    /// cards follow in urgency order.
    pub fn start<C, R>(deck: &Deck, limit: usize, clock: &C, rng: &mut R) -> Self
    where
        C: Clock + ?Sized,
        R: Rng + ?Sized,
    {
        let selector = Selector::new(SelectorConfig {
            limit,
            ..SelectorConfig::default()
        });
        Self::start_with(&selector, Evaluator::default(), deck, clock, rng)
    }

    /// Start a session with explicit selection and evaluation settings.
    pub fn start_with<C, R>(
        selector: &Selector,
        evaluator: Evaluator,
        deck: &Deck,
        clock: &C,
        rng: &mut R,
    ) -> Self
    where
        C: Clock + ?Sized,
        R: Rng + ?Sized,
    {
        let started_at = clock.now();
        let queue: Vec<Uuid> = selector
            .select(&deck.cards, started_at, rng)
            .into_iter()
            .map(|f| f.id())
            .collect();

        let session = Self {
            id: Uuid::new_v4(),
            deck_id: deck.id,
            status: SessionStatus::Active,
            started_at,
            ended_at: None,
            queue,
            reviews: Vec::new(),
            evaluator,
        };

        tracing::info!(
            session_id = %session.id,
            deck_id = %deck.id,
            queued = session.queue.len(),
            "learning session started"
        );
        counter!("sessions_total", "status" => SessionStatus::Active.as_str()).increment(1);

        session
    }

    /// Session id.
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Deck the session was started on.
    pub const fn deck_id(&self) -> Uuid {
        self.deck_id
    }

    /// Current lifecycle state.
    pub const fn status(&self) -> SessionStatus {
        self.status
    }

    /// When the queue was built.
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// When the session was completed or abandoned.
    pub const fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.ended_at
    }

    /// Evaluator applied to every answer.
    pub const fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// Card ids in review order, including already answered ones.
    pub fn queue(&self) -> &[Uuid] {
        &self.queue
    }

    /// Recorded reviews, in answer order.
    pub fn reviews(&self) -> &[CardReview] {
        &self.reviews
    }

    /// Number of recorded reviews.
    pub fn reviews_count(&self) -> usize {
        self.reviews.len()
    }

    /// Number of queued cards not answered yet.
    pub fn remaining(&self) -> usize {
        self.queue.len() - self.reviews.len()
    }

    /// Next card to present, or `None` once the queue is exhausted.
    pub fn next_card(&self) -> Option<Uuid> {
        self.queue
            .iter()
            .copied()
            .find(|id| !self.is_reviewed(*id))
    }

    fn is_reviewed(&self, card_id: Uuid) -> bool {
        self.reviews.iter().any(|r| r.card_id == card_id)
    }

    /// Evaluate `answer` against the deck's card and record the review.
    ///
    /// `deck` must be the deck the session was started on.
    pub fn submit<C>(
        &mut self,
        deck: &mut Deck,
        answer: Answer,
        clock: &C,
    ) -> Result<&CardReview, SessionError>
    where
        C: Clock + ?Sized,
    {
        if let Err(e) = self.check_answer(deck, &answer) {
            tracing::warn!(session_id = %self.id, card_id = %answer.card_id, "rejected answer: {}", e);
            return Err(e);
        }

        let flashcard = deck
            .get_mut(answer.card_id)
            .ok_or(SessionError::CardNotFound(answer.card_id))?;

        let now = clock.now();
        let evaluation =
            self.evaluator
                .evaluate(&mut flashcard.card, answer.is_correct, answer.time_taken, now);

        let outcome = if answer.is_correct { "correct" } else { "incorrect" };
        counter!("reviews_total", "outcome" => outcome).increment(1);
        histogram!("review_time_seconds").record(answer.time_taken);

        tracing::debug!(
            session_id = %self.id,
            card_id = %answer.card_id,
            outcome,
            next_review = %evaluation.next_review,
            "review recorded"
        );

        self.reviews.push(CardReview {
            card_id: answer.card_id,
            is_correct: answer.is_correct,
            difficulty_rating: answer.difficulty_rating,
            time_taken: answer.time_taken,
            quality: evaluation.quality,
            interval: evaluation.interval,
            created_at: now,
        });

        // Just pushed
        Ok(&self.reviews[self.reviews.len() - 1])
    }

    fn check_answer(&self, deck: &Deck, answer: &Answer) -> Result<(), SessionError> {
        self.ensure_active()?;

        if deck.id != self.deck_id {
            return Err(SessionError::DeckMismatch {
                expected: self.deck_id,
                found: deck.id,
            });
        }

        if let Some(rating) = answer.difficulty_rating
            && !(1..=5).contains(&rating)
        {
            return Err(SessionError::Validation(
                "Difficulty rating must be between 1 and 5.".to_string(),
            ));
        }

        if !answer.time_taken.is_finite() || answer.time_taken < 0.0 {
            return Err(SessionError::Validation(format!(
                "Time taken must be a non-negative number of seconds, got {}",
                answer.time_taken
            )));
        }

        if !self.queue.contains(&answer.card_id) {
            return Err(SessionError::CardNotInSession(answer.card_id));
        }

        if self.is_reviewed(answer.card_id) {
            return Err(SessionError::AlreadyReviewed(answer.card_id));
        }

        Ok(())
    }

    /// Mark the session as completed.
    pub fn complete<C: Clock + ?Sized>(&mut self, clock: &C) -> Result<(), SessionError> {
        self.finish(SessionStatus::Completed, clock)
    }

    /// Mark the session as abandoned.
    pub fn abandon<C: Clock + ?Sized>(&mut self, clock: &C) -> Result<(), SessionError> {
        self.finish(SessionStatus::Abandoned, clock)
    }

    fn finish<C: Clock + ?Sized>(
        &mut self,
        status: SessionStatus,
        clock: &C,
    ) -> Result<(), SessionError> {
        self.ensure_active()?;

        self.status = status;
        self.ended_at = Some(clock.now());

        tracing::info!(
            session_id = %self.id,
            status = %status,
            reviews = self.reviews.len(),
            remaining = self.remaining(),
            "learning session ended"
        );
        counter!("sessions_total", "status" => status.as_str()).increment(1);

        Ok(())
    }

    fn ensure_active(&self) -> Result<(), SessionError> {
        match self.status {
            SessionStatus::Active => Ok(()),
            other => Err(SessionError::NotActive(other)),
        }
    }
}
