//! Error types for table operations.

use thiserror::Error;

/// Errors that can occur while staging a bet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BetError {
    /// Invalid round phase for betting.
    #[error("invalid round phase for betting")]
    InvalidState,
    /// Bet amount is zero.
    #[error("bet amount is zero")]
    ZeroBet,
    /// Insufficient funds.
    #[error("insufficient funds")]
    InsufficientFunds,
    /// No previous bet to repeat.
    #[error("no previous bet to repeat")]
    NoLastBet,
}

/// Errors that can occur when starting a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DealError {
    /// Invalid round phase for dealing.
    #[error("invalid round phase for dealing")]
    InvalidState,
    /// No bet has been staged.
    #[error("no bet has been staged")]
    NoBet,
}

/// Errors that can occur during player actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActionError {
    /// Invalid round phase for this action.
    #[error("invalid round phase for this action")]
    InvalidState,
    /// Hand not found.
    #[error("hand not found")]
    HandNotFound,
    /// Hand has already finished.
    #[error("hand has already finished")]
    HandFinished,
    /// Cannot split this hand.
    #[error("cannot split this hand")]
    CannotSplit,
    /// Maximum number of hands reached.
    #[error("maximum number of hands reached")]
    MaxHandsReached,
    /// Surrender is not offered at this table.
    #[error("surrender is not offered at this table")]
    SurrenderNotAllowed,
    /// Insufficient funds for this action.
    #[error("insufficient funds for this action")]
    InsufficientFunds,
}

/// Errors that can occur when changing table settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// Settings can only change between rounds.
    #[error("settings can only change between rounds")]
    RoundInProgress,
}

/// Errors raised by a key/value store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("storage i/o failed: {0}")]
    Io(#[from] std::io::Error),
    /// A value could not be encoded or decoded.
    #[error("storage encoding failed: {0}")]
    Encoding(#[from] serde_json::Error),
}
