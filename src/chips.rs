//! Bankroll and staged bet, in cents.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{BetError, StorageError};
use crate::options::PayoutRatio;
use crate::storage::{KeyValueStore, load_json, save_json};

/// Storage key the bankroll is kept under.
pub const BANKROLL_KEY: &str = "bankroll";

/// Starting bankroll for a new player: 1000.00.
pub const DEFAULT_BANKROLL_CENTS: u64 = 100_000;

/// A player's chips.
///
/// Betting moves cents out of the bankroll into the staged bet. Settlement
/// credits wins and pushes back; losses were already taken when the bet was
/// reserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Chips {
    /// Cents available to bet.
    pub bankroll_cents: u64,
    /// Cents reserved for the current round.
    pub bet_cents: u64,
    /// The opening bet of the previous round, for rebetting.
    pub last_bet_cents: u64,
    /// Lifetime result in cents.
    pub net_cents: i64,
}

impl Default for Chips {
    fn default() -> Self {
        Self::new(DEFAULT_BANKROLL_CENTS)
    }
}

impl Chips {
    /// Creates chips with the given bankroll.
    #[must_use]
    pub const fn new(bankroll_cents: u64) -> Self {
        Self {
            bankroll_cents,
            bet_cents: 0,
            last_bet_cents: 0,
            net_cents: 0,
        }
    }

    /// Loads chips from `store`, falling back to a fresh bankroll.
    ///
    /// A bet that was staged when the chips were saved is returned to the
    /// bankroll.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        let mut chips: Self = load_json(store, BANKROLL_KEY);
        chips.clear_bet();
        chips
    }

    /// Saves chips to `store`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<(), StorageError> {
        save_json(store, BANKROLL_KEY, self)
    }

    /// Returns whether `cents` can be taken from the bankroll.
    #[must_use]
    pub const fn can_afford(&self, cents: u64) -> bool {
        self.bankroll_cents >= cents
    }

    /// Moves `cents` from the bankroll into the staged bet.
    ///
    /// # Errors
    ///
    /// Returns an error if `cents` is zero or exceeds the bankroll.
    pub const fn add_bet(&mut self, cents: u64) -> Result<(), BetError> {
        if cents == 0 {
            return Err(BetError::ZeroBet);
        }
        if !self.can_afford(cents) {
            return Err(BetError::InsufficientFunds);
        }
        self.bankroll_cents -= cents;
        self.bet_cents = self.bet_cents.saturating_add(cents);
        Ok(())
    }

    /// Returns the staged bet to the bankroll.
    pub const fn clear_bet(&mut self) {
        self.bankroll_cents = self.bankroll_cents.saturating_add(self.bet_cents);
        self.bet_cents = 0;
    }

    /// Remembers the staged bet for [`Chips::rebet`].
    pub const fn record_last_bet(&mut self) {
        self.last_bet_cents = self.bet_cents;
    }

    /// Stages the previous round's opening bet again.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no previous bet or it is unaffordable.
    pub const fn rebet(&mut self) -> Result<(), BetError> {
        if self.last_bet_cents == 0 {
            return Err(BetError::NoLastBet);
        }
        self.add_bet(self.last_bet_cents)
    }

    /// Pays a winning `bet` at `ratio`, returning the winnings.
    ///
    /// The bankroll and net saturate rather than overflow.
    pub fn win(&mut self, bet: u64, ratio: PayoutRatio) -> u64 {
        let winnings = ratio.winnings(bet);
        self.bankroll_cents = self
            .bankroll_cents
            .saturating_add(bet)
            .saturating_add(winnings);
        self.net_cents = self.net_cents.saturating_add(signed_cents(winnings));
        debug!(bet, winnings, "win");
        winnings
    }

    /// Settles a losing `bet`. The cents were taken when the bet was placed.
    pub fn lose(&mut self, bet: u64) {
        self.net_cents = self.net_cents.saturating_sub(signed_cents(bet));
        debug!(bet, "lose");
    }

    /// Returns a pushed `bet`.
    pub fn push(&mut self, bet: u64) {
        self.bankroll_cents = self.bankroll_cents.saturating_add(bet);
        debug!(bet, "push");
    }

    /// Hands `cents` of a live bet back mid-round.
    pub const fn refund(&mut self, cents: u64) {
        self.bankroll_cents = self.bankroll_cents.saturating_add(cents);
    }

    /// Drops the staged bet once the round has been settled.
    pub const fn zero_bet(&mut self) {
        self.bet_cents = 0;
    }
}

/// Converts cents to a signed amount, saturating at `i64::MAX`.
pub(crate) fn signed_cents(cents: u64) -> i64 {
    i64::try_from(cents).unwrap_or(i64::MAX)
}
