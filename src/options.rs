//! Table configuration.

use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::storage::{KeyValueStore, load_json, save_json};

/// Storage key the table settings are kept under.
pub const SETTINGS_KEY: &str = "tableSettings";

/// A payout ratio applied to a winning bet, as `numerator / denominator`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PayoutRatio {
    /// Numerator.
    pub numerator: u64,
    /// Denominator, never zero.
    pub denominator: u64,
}

impl PayoutRatio {
    /// 1:1.
    pub const EVEN_MONEY: Self = Self::new(1, 1);
    /// 3:2.
    pub const THREE_TO_TWO: Self = Self::new(3, 2);
    /// 6:5.
    pub const SIX_TO_FIVE: Self = Self::new(6, 5);

    const fn new(numerator: u64, denominator: u64) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Applies the ratio to `bet`, rounding down to a whole cent and
    /// saturating at `u64::MAX`.
    #[must_use]
    pub fn winnings(self, bet: u64) -> u64 {
        let cents = u128::from(bet) * u128::from(self.numerator) / u128::from(self.denominator);
        u64::try_from(cents).unwrap_or(u64::MAX)
    }

    /// Returns the ratio as a multiplier (1.5 for 3:2).
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "payout ratios are small integers"
    )]
    pub fn multiplier(self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }
}

/// What a natural pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BlackjackPays {
    /// 3:2.
    #[default]
    #[serde(rename = "3:2")]
    ThreeToTwo,
    /// 6:5.
    #[serde(rename = "6:5")]
    SixToFive,
}

impl BlackjackPays {
    /// Returns the payout ratio.
    #[must_use]
    pub const fn ratio(self) -> PayoutRatio {
        match self {
            Self::ThreeToTwo => PayoutRatio::THREE_TO_TWO,
            Self::SixToFive => PayoutRatio::SIX_TO_FIVE,
        }
    }
}

/// Configuration for a blackjack table.
///
/// Stored settings are merged with the defaults: any field missing from the
/// stored document keeps its default value.
///
/// ```
/// use bjtable::{BlackjackPays, TableSettings};
///
/// let settings = TableSettings::default()
///     .with_dealer_hits_soft_17(true)
///     .with_blackjack_pays(BlackjackPays::SixToFive)
///     .with_decks(2);
/// assert!(settings.dealer_hits_soft_17);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TableSettings {
    /// Whether the dealer draws on a soft 17.
    #[serde(rename = "dealerHitsSoft17")]
    pub dealer_hits_soft_17: bool,
    /// What a natural pays.
    pub blackjack_pays: BlackjackPays,
    /// Whether surrender is offered.
    pub allow_surrender: bool,
    /// Number of decks in the shoe.
    pub decks: u8,
    /// Fraction of the shoe dealt before reshuffling. 0 to disable.
    pub penetration: f64,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            dealer_hits_soft_17: false,
            blackjack_pays: BlackjackPays::ThreeToTwo,
            allow_surrender: true,
            decks: 6,
            penetration: 0.75,
        }
    }
}

impl TableSettings {
    /// Loads settings from `store`, falling back to the defaults.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        load_json(store, SETTINGS_KEY)
    }

    /// Saves settings to `store`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<(), StorageError> {
        save_json(store, SETTINGS_KEY, self)
    }

    /// Sets whether the dealer hits soft 17.
    #[must_use]
    pub const fn with_dealer_hits_soft_17(mut self, hits: bool) -> Self {
        self.dealer_hits_soft_17 = hits;
        self
    }

    /// Sets what a natural pays.
    #[must_use]
    pub const fn with_blackjack_pays(mut self, pays: BlackjackPays) -> Self {
        self.blackjack_pays = pays;
        self
    }

    /// Sets whether surrender is offered.
    #[must_use]
    pub const fn with_allow_surrender(mut self, allowed: bool) -> Self {
        self.allow_surrender = allowed;
        self
    }

    /// Sets the number of decks.
    #[must_use]
    pub const fn with_decks(mut self, decks: u8) -> Self {
        self.decks = decks;
        self
    }

    /// Sets the deck penetration.
    #[must_use]
    pub const fn with_penetration(mut self, penetration: f64) -> Self {
        self.penetration = penetration;
        self
    }
}
