//! Round engine and table state.

use tracing::debug;

use crate::chips::Chips;
use crate::deck::{Deck, Shoe};
use crate::error::{SettingsError, StorageError};
use crate::hand::{DealerHand, Hand};
use crate::options::TableSettings;
use crate::result::Settlement;
use crate::storage::KeyValueStore;

mod actions;
mod bet;
mod dealer;
pub mod state;

pub use state::{Phase, RoundStart};

/// Most hands a player can hold at once: the opening hand plus three splits.
pub const MAX_HANDS: usize = 4;

/// A single-seat blackjack table.
///
/// The engine owns the deck, the player's chips and the round state. Each
/// call runs to completion; a call whose preconditions are not met returns an
/// error and leaves every part of the table as it was.
///
/// # Example
///
/// ```
/// use bjtable::{BlackjackEngine, Chips, Phase, RoundStart, TableSettings};
///
/// let mut engine = BlackjackEngine::with_seed(TableSettings::default(), Chips::new(10_000), 7);
/// engine.place_bet(500).unwrap();
/// match engine.start_round().unwrap() {
///     RoundStart::InPlay => {
///         engine.stand(0).unwrap();
///         assert_eq!(engine.phase(), Phase::Betting);
///     }
///     RoundStart::Settled(summary) => assert_eq!(summary.hands.len(), 1),
/// }
/// assert!(engine.last_results().is_some());
/// ```
#[derive(Debug, Clone)]
pub struct BlackjackEngine<D = Shoe> {
    settings: TableSettings,
    deck: D,
    chips: Chips,
    phase: Phase,
    hands: Vec<Hand>,
    dealer: DealerHand,
    last_results: Option<Settlement>,
}

impl BlackjackEngine<Shoe> {
    /// Creates a table with a shoe shaped by `settings` and shuffled from
    /// `seed`.
    #[must_use]
    pub fn with_seed(settings: TableSettings, chips: Chips, seed: u64) -> Self {
        let shoe = Shoe::new(settings.decks, settings.penetration, seed);
        Self::new(settings, shoe, chips)
    }

    /// Creates a table from the settings and bankroll kept in `store`.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S, seed: u64) -> Self {
        Self::with_seed(TableSettings::load(store), Chips::load(store), seed)
    }
}

impl<D: Deck> BlackjackEngine<D> {
    /// Creates a table open for betting.
    #[must_use]
    pub const fn new(settings: TableSettings, deck: D, chips: Chips) -> Self {
        Self {
            settings,
            deck,
            chips,
            phase: Phase::Betting,
            hands: Vec::new(),
            dealer: DealerHand::new(),
            last_results: None,
        }
    }

    /// Saves the settings and bankroll to `store`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<(), StorageError> {
        self.settings.save(store)?;
        self.chips.save(store)
    }

    /// Replaces the table settings.
    ///
    /// The shoe keeps its shape; deck count and penetration apply to shoes
    /// built from these settings later.
    ///
    /// # Errors
    ///
    /// Returns an error if a round is in progress.
    pub fn set_settings(&mut self, settings: TableSettings) -> Result<(), SettingsError> {
        if !self.phase.is_between_rounds() {
            return Err(SettingsError::RoundInProgress);
        }
        debug!(?settings, "settings changed");
        self.settings = settings;
        Ok(())
    }

    /// Returns the current phase.
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the table settings.
    pub const fn settings(&self) -> &TableSettings {
        &self.settings
    }

    /// Returns the player's chips.
    pub const fn chips(&self) -> &Chips {
        &self.chips
    }

    /// Returns the deck.
    pub const fn deck(&self) -> &D {
        &self.deck
    }

    /// Returns the player's hands in play order.
    pub fn hands(&self) -> &[Hand] {
        &self.hands
    }

    /// Returns the player's hand at `index`.
    pub fn hand(&self, index: usize) -> Option<&Hand> {
        self.hands.get(index)
    }

    /// Returns the dealer's hand.
    pub const fn dealer(&self) -> &DealerHand {
        &self.dealer
    }

    /// Returns the summary of the last settled round.
    pub const fn last_results(&self) -> Option<&Settlement> {
        self.last_results.as_ref()
    }

    /// Returns the first hand still waiting for a decision.
    pub fn active_hand(&self) -> Option<usize> {
        if self.phase != Phase::Player {
            return None;
        }
        self.hands.iter().position(|hand| !hand.is_finished())
    }

    fn enter(&mut self, phase: Phase) {
        debug!(from = ?self.phase, to = ?phase, "phase");
        self.phase = phase;
    }
}
