//! Round phase types.

use serde::{Deserialize, Serialize};

use crate::result::Settlement;

/// Round phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Table closed; no bets accepted.
    Idle,
    /// Accepting a bet for the next round.
    Betting,
    /// Dealing the opening cards.
    Dealing,
    /// Waiting for player actions.
    Player,
    /// Dealer plays out their hand.
    Dealer,
    /// Paying out the round.
    Settle,
}

impl Phase {
    /// Returns whether no round is in progress.
    #[must_use]
    pub const fn is_between_rounds(self) -> bool {
        matches!(self, Self::Idle | Self::Betting)
    }
}

/// What happened when a round was started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundStart {
    /// Cards are out and the player is to act.
    InPlay,
    /// A natural ended the round on the deal.
    Settled(Settlement),
}
