use tracing::{debug, info};

use crate::chips::signed_cents;
use crate::deck::Deck;
use crate::options::PayoutRatio;
use crate::result::{DealerSummary, HandSummary, Outcome, Settlement};

use super::{BlackjackEngine, Phase};

/// Dealer stands on this total (hard, or soft unless the table hits soft 17).
const DEALER_STANDS_ON: u8 = 17;

impl<D: Deck> BlackjackEngine<D> {
    fn dealer_must_draw(&self) -> bool {
        let value = self.dealer.value();
        value.total < DEALER_STANDS_ON
            || (value.total == DEALER_STANDS_ON && value.soft && self.settings.dealer_hits_soft_17)
    }

    /// Dealer reveals the hole card, draws out their hand, then settles.
    pub(super) fn play_dealer(&mut self) -> Settlement {
        self.dealer.reveal_hole();
        while self.dealer_must_draw() {
            let card = self.deck.draw();
            self.dealer.add_card(card);
            debug!(%card, total = self.dealer.value().total, "dealer draws");
        }

        self.enter(Phase::Settle);
        self.settle()
    }

    /// Pays out every hand against the dealer and reopens betting.
    ///
    /// The summary is kept as [`BlackjackEngine::last_results`] until the
    /// next settlement.
    pub(super) fn settle(&mut self) -> Settlement {
        self.dealer.reveal_hole();
        let dealer_value = self.dealer.value();
        let natural_ratio = self.settings.blackjack_pays.ratio();

        let hands = std::mem::take(&mut self.hands);
        let mut summaries = Vec::with_capacity(hands.len());
        let mut round_net: i64 = 0;

        for hand in hands {
            let value = hand.value();
            let blackjack = hand.is_blackjack();
            let bet = hand.bet();

            let (outcome, net_cents) = if hand.is_surrendered() {
                // Half the bet went back at surrender time; this is the rest.
                self.chips.lose(bet);
                (Outcome::Surrender, -signed_cents(bet))
            } else if hand.is_bust() {
                self.chips.lose(bet);
                (Outcome::Loss, -signed_cents(bet))
            } else if dealer_value.is_bust() || value.total > dealer_value.total {
                let ratio = if blackjack {
                    natural_ratio
                } else {
                    PayoutRatio::EVEN_MONEY
                };
                let winnings = self.chips.win(bet, ratio);
                (Outcome::Win, signed_cents(winnings))
            } else if value.total < dealer_value.total {
                self.chips.lose(bet);
                (Outcome::Loss, -signed_cents(bet))
            } else {
                self.chips.push(bet);
                (Outcome::Push, 0)
            };

            round_net = round_net.saturating_add(net_cents);
            summaries.push(HandSummary {
                value: value.total,
                blackjack,
                bust: hand.is_bust(),
                surrendered: hand.is_surrendered(),
                doubled: hand.is_doubled(),
                bet,
                outcome,
                net_cents,
                cards: hand.cards().to_vec(),
            });
        }

        let settlement = Settlement {
            hands: summaries,
            dealer: DealerSummary {
                cards: self.dealer.cards().to_vec(),
                value: dealer_value.total,
                bust: dealer_value.is_bust(),
                blackjack: self.dealer.is_blackjack(),
            },
            net_cents: round_net,
            bankroll_cents: self.chips.bankroll_cents,
        };

        info!(
            outcomes = ?settlement.outcomes(),
            dealer = dealer_value.total,
            net_cents = round_net,
            bankroll_cents = settlement.bankroll_cents,
            "round settled"
        );

        self.dealer.clear();
        self.chips.zero_bet();
        self.last_results = Some(settlement.clone());
        self.enter(Phase::Betting);
        settlement
    }
}
