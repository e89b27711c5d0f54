use tracing::debug;

use crate::card::Card;
use crate::deck::Deck;
use crate::error::ActionError;
use crate::hand::Hand;

use super::{BlackjackEngine, MAX_HANDS, Phase};

fn playable(hands: &mut [Hand], index: usize) -> Result<&mut Hand, ActionError> {
    let hand = hands.get_mut(index).ok_or(ActionError::HandNotFound)?;
    if hand.is_finished() {
        return Err(ActionError::HandFinished);
    }
    Ok(hand)
}

impl<D: Deck> BlackjackEngine<D> {
    fn ensure_player_phase(&self) -> Result<(), ActionError> {
        if self.phase == Phase::Player {
            Ok(())
        } else {
            Err(ActionError::InvalidState)
        }
    }

    /// Hands the round to the dealer once every hand is bust, stood or
    /// surrendered.
    fn finish_player_turn_if_done(&mut self) {
        if self.hands.iter().all(Hand::is_finished) {
            self.enter(Phase::Dealer);
            self.play_dealer();
        }
    }

    /// Player action: Hit (draw a card).
    ///
    /// # Errors
    ///
    /// Returns an error if the player is not to act, or the hand does not
    /// exist or has finished.
    pub fn hit(&mut self, index: usize) -> Result<Card, ActionError> {
        self.ensure_player_phase()?;
        let hand = playable(&mut self.hands, index)?;

        let card = self.deck.draw();
        hand.add_card(card);
        let bust = hand.is_bust();
        debug!(hand = index, %card, total = hand.value().total, bust, "hit");

        if bust {
            self.finish_player_turn_if_done();
        }
        Ok(card)
    }

    /// Player action: Stand (keep the current total).
    ///
    /// # Errors
    ///
    /// Returns an error if the player is not to act, or the hand does not
    /// exist or has finished.
    pub fn stand(&mut self, index: usize) -> Result<(), ActionError> {
        self.ensure_player_phase()?;
        let hand = playable(&mut self.hands, index)?;

        hand.mark_stand();
        debug!(hand = index, total = hand.value().total, "stand");

        self.finish_player_turn_if_done();
        Ok(())
    }

    /// Player action: Double (match the bet, take exactly one card, stand).
    ///
    /// # Errors
    ///
    /// Returns an error if the player is not to act, the hand does not exist
    /// or has finished, or the bankroll cannot match the hand's bet.
    pub fn double(&mut self, index: usize) -> Result<Card, ActionError> {
        self.ensure_player_phase()?;
        let hand = playable(&mut self.hands, index)?;

        self.chips
            .add_bet(hand.bet())
            .map_err(|_| ActionError::InsufficientFunds)?;
        hand.double_bet();

        let card = self.deck.draw();
        hand.add_card(card);
        if !hand.is_bust() {
            hand.mark_stand();
        }
        debug!(hand = index, %card, bet = hand.bet(), total = hand.value().total, "double");

        self.finish_player_turn_if_done();
        Ok(card)
    }

    /// Player action: Split (turn a pair into two hands).
    ///
    /// The second card moves to a new hand placed right after this one with
    /// the same bet, and each hand is dealt one more card.
    ///
    /// # Errors
    ///
    /// Returns an error if the player is not to act, the hand does not exist,
    /// has finished or is not a pair, the table already holds the most hands
    /// allowed, or the bankroll cannot cover the second bet.
    pub fn split(&mut self, index: usize) -> Result<(), ActionError> {
        self.ensure_player_phase()?;
        if self.hands.len() >= MAX_HANDS {
            return Err(ActionError::MaxHandsReached);
        }

        let hand = playable(&mut self.hands, index)?;
        if !hand.is_pair() {
            return Err(ActionError::CannotSplit);
        }
        let bet = hand.bet();
        if !self.chips.can_afford(bet) {
            return Err(ActionError::InsufficientFunds);
        }

        let mut new_hand = hand.split_off().ok_or(ActionError::CannotSplit)?;
        self.chips
            .add_bet(bet)
            .map_err(|_| ActionError::InsufficientFunds)?;

        hand.add_card(self.deck.draw());
        new_hand.add_card(self.deck.draw());
        self.hands.insert(index + 1, new_hand);
        debug!(hand = index, hands = self.hands.len(), "split");

        Ok(())
    }

    /// Player action: Surrender (give up half the bet and end the hand).
    ///
    /// Half the bet returns to the bankroll now; the other half is forfeited
    /// at settlement. Returns the cents handed back.
    ///
    /// # Errors
    ///
    /// Returns an error if the player is not to act, surrender is not offered,
    /// or the hand does not exist or has finished.
    pub fn surrender(&mut self, index: usize) -> Result<u64, ActionError> {
        self.ensure_player_phase()?;
        if !self.settings.allow_surrender {
            return Err(ActionError::SurrenderNotAllowed);
        }
        let hand = playable(&mut self.hands, index)?;

        let refund = hand.surrender();
        self.chips.refund(refund);
        debug!(hand = index, refund, "surrender");

        self.finish_player_turn_if_done();
        Ok(refund)
    }
}
