//! Errors returned by session operations.

use thiserror::Error;
use uuid::Uuid;

use crate::session::SessionStatus;

/// Why a session rejected an operation.
///
/// A rejected operation leaves the session and the deck untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    /// The session was already completed or abandoned
    #[error("Session is no longer active (status: {0})")]
    NotActive(SessionStatus),
    /// The deck passed in is not the one the session was started on
    #[error("Session belongs to deck {expected}, got deck {found}")]
    DeckMismatch {
        /// Deck the session was started on
        expected: Uuid,
        /// Deck that was passed in
        found: Uuid,
    },
    /// The card was not queued when the session started
    #[error("Card {0} is not part of this session")]
    CardNotInSession(Uuid),
    /// Each queued card takes one answer
    #[error("Card {0} was already reviewed in this session")]
    AlreadyReviewed(Uuid),
    /// The card was queued but has since been removed from the deck
    #[error("Card {0} not found in deck")]
    CardNotFound(Uuid),
    /// Malformed answer
    #[error("Validation error: {0}")]
    Validation(String),
}
