//! Decks and the flashcards they hold.

use chrono::{DateTime, Utc};
use lk_srs::Card;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Flashcard content together with its scheduling state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flashcard {
    /// Prompt side
    pub front: String,
    /// Answer side
    pub back: String,
    /// Scheduling state, owned by the SRS engine
    pub card: Card,
}

impl Flashcard {
    /// New, never reviewed card.
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            front: front.into(),
            back: back.into(),
            card: Card::default(),
        }
    }

    /// Id of the underlying scheduling card.
    pub const fn id(&self) -> Uuid {
        self.card.id
    }
}

impl AsRef<Card> for Flashcard {
    fn as_ref(&self) -> &Card {
        &self.card
    }
}

/// Deck of flashcards belonging to one learner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    /// Unique deck identifier
    pub id: Uuid,
    /// Deck title
    pub title: String,
    /// Cards in insertion order
    pub cards: Vec<Flashcard>,
}

impl Deck {
    /// Empty deck with a fresh id.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            cards: Vec::new(),
        }
    }

    /// Add a fresh card and return its id.
    pub fn add_card(&mut self, front: impl Into<String>, back: impl Into<String>) -> Uuid {
        let flashcard = Flashcard::new(front, back);
        let id = flashcard.id();
        self.cards.push(flashcard);
        id
    }

    /// Card with `card_id`, if the deck holds it.
    pub fn get(&self, card_id: Uuid) -> Option<&Flashcard> {
        self.cards.iter().find(|f| f.id() == card_id)
    }

    /// Mutable access to the card with `card_id`.
    pub fn get_mut(&mut self, card_id: Uuid) -> Option<&mut Flashcard> {
        self.cards.iter_mut().find(|f| f.id() == card_id)
    }

    /// Number of cards due at `now`.
    pub fn due_count(&self, now: DateTime<Utc>) -> usize {
        self.cards.iter().filter(|f| f.card.is_due(now)).count()
    }

    /// Number of cards.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the deck has no cards.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
