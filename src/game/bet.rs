use tracing::{debug, info};

use crate::deck::Deck;
use crate::error::{BetError, DealError};
use crate::hand::Hand;

use super::{BlackjackEngine, Phase, RoundStart};

impl<D: Deck> BlackjackEngine<D> {
    fn ensure_betting(&self) -> Result<(), BetError> {
        if self.phase == Phase::Betting {
            Ok(())
        } else {
            Err(BetError::InvalidState)
        }
    }

    /// Opens a closed table for betting.
    ///
    /// # Errors
    ///
    /// Returns an error if the table is not idle.
    pub fn open_table(&mut self) -> Result<(), BetError> {
        if self.phase != Phase::Idle {
            return Err(BetError::InvalidState);
        }
        self.enter(Phase::Betting);
        Ok(())
    }

    /// Closes the table between rounds, returning any staged bet.
    ///
    /// # Errors
    ///
    /// Returns an error if the table is not taking bets.
    pub fn close_table(&mut self) -> Result<(), BetError> {
        self.ensure_betting()?;
        self.chips.clear_bet();
        self.enter(Phase::Idle);
        Ok(())
    }

    /// Adds `cents` to the staged bet.
    ///
    /// # Errors
    ///
    /// Returns an error if the table is not taking bets, the amount is zero,
    /// or the bankroll cannot cover it.
    pub fn place_bet(&mut self, cents: u64) -> Result<(), BetError> {
        self.ensure_betting()?;
        self.chips.add_bet(cents)?;
        debug!(cents, staged = self.chips.bet_cents, "bet placed");
        Ok(())
    }

    /// Returns the staged bet to the bankroll, yielding the amount returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the table is not taking bets.
    pub fn clear_bet(&mut self) -> Result<u64, BetError> {
        self.ensure_betting()?;
        let staged = self.chips.bet_cents;
        self.chips.clear_bet();
        Ok(staged)
    }

    /// Stages the previous round's opening bet.
    ///
    /// # Errors
    ///
    /// Returns an error if the table is not taking bets, there is no previous
    /// bet, or the bankroll cannot cover it.
    pub fn rebet(&mut self) -> Result<(), BetError> {
        self.ensure_betting()?;
        self.chips.rebet()
    }

    /// Deals a new round on the staged bet.
    ///
    /// Two cards go to the player, then two to the dealer. A natural in
    /// either hand settles the round at once.
    ///
    /// # Errors
    ///
    /// Returns an error if the table is not taking bets or no bet is staged.
    pub fn start_round(&mut self) -> Result<RoundStart, DealError> {
        if self.phase != Phase::Betting {
            return Err(DealError::InvalidState);
        }
        let bet = self.chips.bet_cents;
        if bet == 0 {
            return Err(DealError::NoBet);
        }

        self.chips.record_last_bet();
        if self.deck.reshuffle_if_needed() {
            info!("shoe reshuffled");
        }

        self.enter(Phase::Dealing);
        self.dealer.clear();
        let cards = vec![self.deck.draw(), self.deck.draw()];
        self.hands = vec![Hand::new(cards, bet)];
        self.dealer.add_card(self.deck.draw());
        self.dealer.add_card(self.deck.draw());
        info!(bet, "round started");

        let player_natural = self.hands.iter().any(Hand::is_blackjack);
        if player_natural || self.dealer.is_blackjack() {
            debug!(player_natural, "natural on the deal");
            self.enter(Phase::Settle);
            return Ok(RoundStart::Settled(self.settle()));
        }

        self.enter(Phase::Player);
        Ok(RoundStart::InPlay)
    }
}
