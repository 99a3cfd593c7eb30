use chrono::{DateTime, TimeZone, Utc};
use lk_session::Deck;
use lk_srs::FixedClock;
use rand::{SeedableRng, rngs::StdRng};

/// Vocabulary used to fill test decks
const WORDS: &[(&str, &str)] = &[
    ("hello", "hola"),
    ("goodbye", "adiós"),
    ("thanks", "gracias"),
    ("please", "por favor"),
    ("water", "agua"),
    ("bread", "pan"),
    ("house", "casa"),
    ("dog", "perro"),
    ("cat", "gato"),
    ("book", "libro"),
];

pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 23, 9, 0, 0).unwrap()
}

/// Test fixture bundling a deck with a pinned clock and a seeded RNG
pub struct TestEnv {
    pub deck: Deck,
    pub clock: FixedClock,
    pub rng: StdRng,
}

impl TestEnv {
    /// Deck with `size` fresh cards (at most the size of the word list)
    pub fn with_cards(size: usize) -> Self {
        let mut deck = Deck::new("Spanish Basics");
        for (front, back) in WORDS.iter().take(size) {
            deck.add_card(*front, *back);
        }

        Self {
            deck,
            clock: FixedClock::new(start_time()),
            rng: StdRng::seed_from_u64(2025),
        }
    }
}
