//! Learning sessions on top of the Lernkarten SRS engine.
//!
//! A [`LearningSession`] snapshots the review order of a [`Deck`] when it
//! starts, accepts one [`Answer`] per queued card, runs each through the
//! evaluator and keeps a [`CardReview`] record of it. [`stats`] turns decks
//! and sessions into the numbers shown on a dashboard.

pub mod deck;
pub mod error;
pub mod session;
pub mod stats;

pub use deck::{Deck, Flashcard};
pub use error::SessionError;
pub use session::{Answer, CardReview, LearningSession, SessionStatus};
pub use stats::{DeckStats, LearnerStats, SessionSummary};
