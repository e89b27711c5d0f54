//! A single-seat blackjack table engine.
//!
//! The crate provides a [`BlackjackEngine`] that runs one round at a time
//! through betting, dealing, player actions, dealer play and settlement. The
//! shoe, the player's chips and the table settings are plain values handed
//! to the engine; settings and bankroll persist through any
//! [`KeyValueStore`].
//!
//! # Example
//!
//! ```
//! use bjtable::{BlackjackEngine, MemoryStore};
//!
//! let store = MemoryStore::new();
//! let mut engine = BlackjackEngine::load(&store, 42);
//! engine.place_bet(2_500).unwrap();
//! let _ = engine.start_round().unwrap();
//! ```

pub mod card;
pub mod chips;
pub mod deck;
pub mod error;
pub mod game;
pub mod hand;
pub mod options;
pub mod result;
pub mod storage;

// Re-export main types
pub use card::{Card, DECK_SIZE, Rank, Suit};
pub use chips::{BANKROLL_KEY, Chips, DEFAULT_BANKROLL_CENTS};
pub use deck::{Deck, Shoe, StackedDeck};
pub use error::{ActionError, BetError, DealError, SettingsError, StorageError};
pub use game::{BlackjackEngine, MAX_HANDS, Phase, RoundStart};
pub use hand::{BLACKJACK, DealerHand, Hand, HandValue, hand_value, is_blackjack};
pub use options::{BlackjackPays, PayoutRatio, SETTINGS_KEY, TableSettings};
pub use result::{DealerSummary, HandSummary, Outcome, Settlement};
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore, load_json, save_json};
