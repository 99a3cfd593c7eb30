//! SRS (Spaced Repetition System) engine for Lernkarten
//!
//! This crate provides the scheduling core used by review sessions:
//!
//! * [`select_for_review`] decides which cards of a deck are due and in which
//!   order they are drilled.
//! * [`evaluate`] applies a review outcome to a card using a latency-scored
//!   SM-2 update.
//!
//! Neither operation performs I/O. The current instant and the random source
//! are passed in by the caller, so the engine holds no global state and is
//! fully deterministic under a fixed clock and a seeded RNG.

pub mod card;
pub mod clock;
pub mod evaluator;
pub mod selector;

pub use card::Card;
pub use clock::{Clock, FixedClock, SystemClock};
pub use evaluator::{Evaluation, Evaluator, EvaluatorConfig, MAX_INTERVAL_DAYS, Quality, evaluate};
pub use selector::{DEFAULT_REVIEW_LIMIT, Selector, SelectorConfig, review_weight, select_for_review};
