//! Settlement summary types.

use serde::{Deserialize, Serialize};

use crate::card::Card;

/// Result of a single hand at settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Player beat the dealer or the dealer busted.
    Win,
    /// Equal totals; bet returned.
    Push,
    /// Player busted or the dealer was higher.
    Loss,
    /// Player surrendered half the bet.
    Surrender,
}

impl Outcome {
    /// Returns the outcome as a signed score: +1 win, 0 push, -1 loss,
    /// -0.5 surrender.
    #[must_use]
    pub const fn score(self) -> f64 {
        match self {
            Self::Win => 1.0,
            Self::Push => 0.0,
            Self::Loss => -1.0,
            Self::Surrender => -0.5,
        }
    }
}

/// Final state of a player hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandSummary {
    /// The hand's cards.
    pub cards: Vec<Card>,
    /// Bet at settlement, in cents. Halved for a surrendered hand.
    pub bet: u64,
    /// Final total.
    pub value: u8,
    /// Whether the hand was a two-card 21.
    pub blackjack: bool,
    /// Whether the hand busted.
    pub bust: bool,
    /// Whether the hand was surrendered.
    pub surrendered: bool,
    /// Whether the bet was doubled.
    pub doubled: bool,
    /// Outcome against the dealer.
    pub outcome: Outcome,
    /// Cents won (positive) or forfeited (negative) on this hand.
    pub net_cents: i64,
}

/// Final state of the dealer's hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealerSummary {
    /// The dealer's cards.
    pub cards: Vec<Card>,
    /// Final total.
    pub value: u8,
    /// Whether the dealer busted.
    pub bust: bool,
    /// Whether the dealer held a natural.
    pub blackjack: bool,
}

/// Summary of a settled round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    /// One entry per player hand, in hand order.
    pub hands: Vec<HandSummary>,
    /// The dealer's final hand.
    pub dealer: DealerSummary,
    /// Total cents won or lost this round.
    pub net_cents: i64,
    /// Bankroll after settlement, in cents.
    pub bankroll_cents: u64,
}

impl Settlement {
    /// Returns each hand's outcome in hand order.
    #[must_use]
    pub fn outcomes(&self) -> Vec<Outcome> {
        self.hands.iter().map(|hand| hand.outcome).collect()
    }
}
