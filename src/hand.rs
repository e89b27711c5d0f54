//! Player and dealer hand representations.

use serde::{Deserialize, Serialize};

use crate::card::Card;

/// Highest total a hand can hold without busting.
pub const BLACKJACK: u8 = 21;

/// Evaluated total of a set of cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandValue {
    /// Best total, with aces dropped from 11 to 1 as needed.
    pub total: u8,
    /// Whether at least one ace still counts as 11.
    pub soft: bool,
}

impl HandValue {
    /// Returns whether the total is over 21.
    #[must_use]
    pub const fn is_bust(&self) -> bool {
        self.total > BLACKJACK
    }
}

/// Evaluates a set of cards.
///
/// Aces start at 11 and are recounted as 1, one at a time, while the total
/// is over 21.
#[must_use]
pub fn hand_value(cards: &[Card]) -> HandValue {
    let mut total: u8 = 0;
    let mut high_aces: u8 = 0;

    for card in cards {
        if card.is_ace() {
            high_aces += 1;
        }
        total = total.saturating_add(card.rank.points());
    }

    while total > BLACKJACK && high_aces > 0 {
        total -= 10;
        high_aces -= 1;
    }

    HandValue {
        total,
        soft: high_aces > 0,
    }
}

/// Returns whether the cards form a natural (two cards totalling 21).
#[must_use]
pub fn is_blackjack(cards: &[Card]) -> bool {
    cards.len() == 2 && hand_value(cards).total == BLACKJACK
}

/// A player's hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Card>,
    bet: u64,
    doubled: bool,
    surrendered: bool,
    bust: bool,
    stand: bool,
}

impl Hand {
    /// Creates a new hand holding the given cards and bet (in cents).
    #[must_use]
    pub const fn new(cards: Vec<Card>, bet: u64) -> Self {
        Self {
            cards,
            bet,
            doubled: false,
            surrendered: false,
            bust: false,
            stand: false,
        }
    }

    /// Returns the cards in the hand.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the bet on this hand in cents.
    #[must_use]
    pub const fn bet(&self) -> u64 {
        self.bet
    }

    /// Whether the bet was doubled.
    #[must_use]
    pub const fn is_doubled(&self) -> bool {
        self.doubled
    }

    /// Whether the hand was surrendered.
    #[must_use]
    pub const fn is_surrendered(&self) -> bool {
        self.surrendered
    }

    /// Whether the hand went over 21.
    #[must_use]
    pub const fn is_bust(&self) -> bool {
        self.bust
    }

    /// Whether the player stood on this hand.
    #[must_use]
    pub const fn is_stand(&self) -> bool {
        self.stand
    }

    /// Returns whether the hand takes no further actions.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.bust || self.stand || self.surrendered
    }

    /// Evaluates the hand.
    #[must_use]
    pub fn value(&self) -> HandValue {
        hand_value(&self.cards)
    }

    /// Returns whether the hand is a natural.
    #[must_use]
    pub fn is_blackjack(&self) -> bool {
        is_blackjack(&self.cards)
    }

    /// Returns whether the hand is a pair that may be split.
    #[must_use]
    pub fn is_pair(&self) -> bool {
        matches!(self.cards.as_slice(), [a, b] if a.rank == b.rank)
    }

    /// Returns the number of cards in the hand.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the hand is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Adds a card, marking the hand bust when it goes over 21.
    pub(crate) fn add_card(&mut self, card: Card) {
        self.cards.push(card);
        if self.value().is_bust() {
            self.bust = true;
        }
    }

    pub(crate) const fn mark_stand(&mut self) {
        self.stand = true;
    }

    pub(crate) const fn double_bet(&mut self) {
        self.bet = self.bet.saturating_mul(2);
        self.doubled = true;
    }

    /// Marks the hand surrendered and returns the half of the bet handed back.
    ///
    /// The recorded bet becomes the remaining half, which the hand forfeits
    /// at settlement.
    pub(crate) const fn surrender(&mut self) -> u64 {
        let refund = self.bet / 2;
        self.bet -= refund;
        self.surrendered = true;
        self.stand = true;
        refund
    }

    /// Splits off the second card into a new hand carrying the same bet.
    pub(crate) fn split_off(&mut self) -> Option<Self> {
        if !self.is_pair() {
            return None;
        }
        let card = self.cards.pop()?;
        Some(Self::new(vec![card], self.bet))
    }
}

/// The dealer's hand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealerHand {
    cards: Vec<Card>,
    hole_revealed: bool,
}

impl DealerHand {
    /// Creates a new empty dealer hand.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cards: Vec::new(),
            hole_revealed: false,
        }
    }

    /// Returns all cards in the hand.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the face-up card.
    #[must_use]
    pub fn up_card(&self) -> Option<&Card> {
        self.cards.first()
    }

    /// Returns whether the hole card is revealed.
    #[must_use]
    pub const fn is_hole_revealed(&self) -> bool {
        self.hole_revealed
    }

    /// Evaluates only what the player can see: the up card until the hole
    /// card is revealed.
    #[must_use]
    pub fn visible_value(&self) -> HandValue {
        if self.hole_revealed {
            self.value()
        } else {
            hand_value(&self.cards[..self.cards.len().min(1)])
        }
    }

    /// Evaluates the full hand.
    #[must_use]
    pub fn value(&self) -> HandValue {
        hand_value(&self.cards)
    }

    /// Returns whether the hand is a natural.
    #[must_use]
    pub fn is_blackjack(&self) -> bool {
        is_blackjack(&self.cards)
    }

    /// Returns the number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the hand is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub(crate) fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub(crate) const fn reveal_hole(&mut self) {
        self.hole_revealed = true;
    }

    pub(crate) fn clear(&mut self) {
        self.cards.clear();
        self.hole_revealed = false;
    }
}
