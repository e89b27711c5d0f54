//! Card sources for the table.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::card::{Card, DECK_SIZE, Rank, Suit};

/// A source of card draws.
///
/// Implementations never run out: a shoe reshuffles, a scripted deck cycles.
pub trait Deck {
    /// Draws the next card.
    fn draw(&mut self) -> Card;

    /// Reshuffles if the source wants a fresh shuffle before the next round.
    ///
    /// Returns `true` if a reshuffle was performed.
    fn reshuffle_if_needed(&mut self) -> bool {
        false
    }
}

/// A seeded multi-deck shoe.
#[derive(Debug, Clone)]
pub struct Shoe {
    cards: Vec<Card>,
    decks: u8,
    penetration: f64,
    rng: ChaCha8Rng,
}

impl Shoe {
    /// Creates a shuffled shoe of `decks` decks.
    ///
    /// `penetration` is the fraction of the shoe dealt before
    /// [`Deck::reshuffle_if_needed`] reshuffles; `0.0` disables it. A shoe
    /// always holds at least one deck.
    #[must_use]
    pub fn new(decks: u8, penetration: f64, seed: u64) -> Self {
        let mut shoe = Self {
            cards: Vec::new(),
            decks: decks.max(1),
            penetration,
            rng: ChaCha8Rng::seed_from_u64(seed),
        };
        shoe.reshuffle();
        shoe
    }

    /// Gathers every card back into the shoe and shuffles it.
    pub fn reshuffle(&mut self) {
        let mut cards = Vec::with_capacity(self.total_cards());
        for _ in 0..self.decks {
            for suit in Suit::ALL {
                for rank in Rank::ALL {
                    cards.push(Card::new(rank, suit));
                }
            }
        }
        cards.shuffle(&mut self.rng);
        self.cards = cards;
        debug!(decks = self.decks, "shoe shuffled");
    }

    /// Returns the number of cards left before the next reshuffle.
    #[must_use]
    pub fn cards_remaining(&self) -> usize {
        self.cards.len()
    }

    /// Returns the number of cards in a full shoe.
    #[must_use]
    pub const fn total_cards(&self) -> usize {
        self.decks as usize * DECK_SIZE
    }

    /// Returns whether the dealt fraction has reached the penetration mark.
    #[must_use]
    pub fn needs_reshuffle(&self) -> bool {
        if self.penetration <= 0.0 {
            return false;
        }

        #[expect(
            clippy::cast_precision_loss,
            reason = "f64 has sufficient precision for card counts"
        )]
        let used_ratio = 1.0 - (self.cards_remaining() as f64 / self.total_cards() as f64);

        used_ratio >= self.penetration
    }
}

impl Deck for Shoe {
    fn draw(&mut self) -> Card {
        loop {
            if let Some(card) = self.cards.pop() {
                return card;
            }
            self.reshuffle();
        }
    }

    fn reshuffle_if_needed(&mut self) -> bool {
        if self.needs_reshuffle() {
            self.reshuffle();
            true
        } else {
            false
        }
    }
}

/// A deck that deals a fixed sequence of cards, starting over when it runs out.
///
/// Useful for replaying a recorded round.
#[derive(Debug, Clone)]
pub struct StackedDeck {
    script: Vec<Card>,
    queue: VecDeque<Card>,
}

impl StackedDeck {
    /// Creates a deck that deals `cards` in order.
    ///
    /// An empty script deals the ace of spades forever.
    #[must_use]
    pub fn new(cards: Vec<Card>) -> Self {
        let script = if cards.is_empty() {
            vec![Card::new(Rank::Ace, Suit::Spades)]
        } else {
            cards
        };
        Self {
            queue: script.iter().copied().collect(),
            script,
        }
    }

    /// Returns how many scripted cards remain before the script restarts.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl Deck for StackedDeck {
    fn draw(&mut self) -> Card {
        loop {
            if let Some(card) = self.queue.pop_front() {
                return card;
            }
            self.queue.extend(self.script.iter().copied());
        }
    }
}
