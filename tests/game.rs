//! Round engine integration tests.

use bjtable::{
    ActionError, BetError, BlackjackEngine, BlackjackPays, Card, Chips, DealError, MemoryStore,
    Outcome, Phase, Rank, RoundStart, SettingsError, StackedDeck, Suit, TableSettings,
};

const fn card(rank: Rank) -> Card {
    Card::new(rank, Suit::Spades)
}

/// Builds a table whose deck deals `draws` in order: two player cards, the
/// dealer's up card and hole card, then every later draw.
fn table(settings: TableSettings, bankroll: u64, draws: &[Rank]) -> BlackjackEngine<StackedDeck> {
    let deck = StackedDeck::new(draws.iter().copied().map(card).collect());
    BlackjackEngine::new(settings, deck, Chips::new(bankroll))
}

fn dealt(
    settings: TableSettings,
    bankroll: u64,
    bet: u64,
    draws: &[Rank],
) -> BlackjackEngine<StackedDeck> {
    let mut engine = table(settings, bankroll, draws);
    engine.place_bet(bet).unwrap();
    assert_eq!(engine.start_round().unwrap(), RoundStart::InPlay);
    engine
}

#[test]
fn start_round_without_bet_is_refused() {
    let mut engine = table(TableSettings::default(), 10_000, &[Rank::Two]);

    assert_eq!(engine.start_round().unwrap_err(), DealError::NoBet);
    assert_eq!(engine.phase(), Phase::Betting);
    assert!(engine.hands().is_empty());
    assert_eq!(engine.deck().remaining(), 1);
}

#[test]
fn zero_bet_is_refused() {
    let mut engine = table(TableSettings::default(), 10_000, &[Rank::Two]);
    assert_eq!(engine.place_bet(0).unwrap_err(), BetError::ZeroBet);
    assert_eq!(engine.place_bet(10_001).unwrap_err(), BetError::InsufficientFunds);
    assert_eq!(engine.chips().bet_cents, 0);
    assert_eq!(engine.start_round().unwrap_err(), DealError::NoBet);
}

#[test]
fn two_naturals_push_without_play() {
    let mut engine = table(
        TableSettings::default(),
        10_000,
        &[Rank::Ace, Rank::Queen, Rank::Ace, Rank::King, Rank::Five],
    );
    engine.place_bet(1_000).unwrap();

    let RoundStart::Settled(summary) = engine.start_round().unwrap() else {
        panic!("naturals should settle on the deal");
    };
    assert_eq!(summary.outcomes(), vec![Outcome::Push]);
    assert!(summary.hands[0].blackjack);
    assert!(summary.dealer.blackjack);
    assert_eq!(summary.dealer.cards.len(), 2);
    assert_eq!(engine.deck().remaining(), 1);

    assert_eq!(engine.phase(), Phase::Betting);
    assert!(engine.hands().is_empty());
    assert!(engine.dealer().is_empty());
    assert_eq!(engine.chips().bankroll_cents, 10_000);
    assert_eq!(engine.chips().bet_cents, 0);
    assert_eq!(engine.last_results(), Some(&summary));
}

#[test]
fn player_natural_pays_three_to_two_without_dealer_play() {
    let mut engine = table(
        TableSettings::default(),
        10_000,
        &[Rank::Ace, Rank::King, Rank::Nine, Rank::Five, Rank::Ten],
    );
    engine.place_bet(1_000).unwrap();

    let RoundStart::Settled(summary) = engine.start_round().unwrap() else {
        panic!("player natural should settle on the deal");
    };
    assert_eq!(summary.outcomes(), vec![Outcome::Win]);
    assert_eq!(summary.hands[0].net_cents, 1_500);
    assert_eq!(summary.dealer.cards.len(), 2);
    assert_eq!(summary.dealer.value, 14);
    assert_eq!(engine.chips().bankroll_cents, 11_500);
}

#[test]
fn six_to_five_tables_pay_less_for_naturals() {
    let settings = TableSettings::default().with_blackjack_pays(BlackjackPays::SixToFive);
    let mut engine = table(settings, 10_000, &[Rank::Ace, Rank::Jack, Rank::Nine, Rank::Nine]);
    engine.place_bet(1_000).unwrap();

    let RoundStart::Settled(summary) = engine.start_round().unwrap() else {
        panic!("player natural should settle on the deal");
    };
    assert_eq!(summary.hands[0].net_cents, 1_200);
    assert_eq!(engine.chips().bankroll_cents, 11_200);
}

#[test]
fn natural_on_a_huge_bankroll_saturates() {
    let mut engine = table(
        TableSettings::default(),
        u64::MAX,
        &[Rank::Ace, Rank::King, Rank::Nine, Rank::Five],
    );
    engine.place_bet(u64::MAX / 2).unwrap();

    let RoundStart::Settled(summary) = engine.start_round().unwrap() else {
        panic!("a natural settles immediately");
    };
    assert_eq!(summary.hands[0].outcome, Outcome::Win);
    assert!(summary.hands[0].blackjack);
    assert_eq!(summary.hands[0].net_cents, i64::MAX);
    assert_eq!(summary.net_cents, i64::MAX);
    assert_eq!(summary.bankroll_cents, u64::MAX);
    assert_eq!(engine.chips().bankroll_cents, u64::MAX);
    assert_eq!(engine.phase(), Phase::Betting);
}

#[test]
fn dealer_natural_beats_player() {
    let mut engine = table(
        TableSettings::default(),
        10_000,
        &[Rank::Ten, Rank::Nine, Rank::Ace, Rank::King],
    );
    engine.place_bet(1_000).unwrap();

    let RoundStart::Settled(summary) = engine.start_round().unwrap() else {
        panic!("dealer natural should settle on the deal");
    };
    assert_eq!(summary.outcomes(), vec![Outcome::Loss]);
    assert_eq!(summary.net_cents, -1_000);
    assert_eq!(engine.chips().bankroll_cents, 9_000);
}

#[test]
fn basic_round_flow() {
    let mut engine = dealt(
        TableSettings::default(),
        10_000,
        1_000,
        &[Rank::Ten, Rank::Six, Rank::Ten, Rank::Seven, Rank::Five],
    );
    assert_eq!(engine.phase(), Phase::Player);
    assert_eq!(engine.active_hand(), Some(0));
    assert!(!engine.dealer().is_hole_revealed());
    assert_eq!(engine.dealer().visible_value().total, 10);

    let drawn = engine.hit(0).unwrap();
    assert_eq!(drawn.rank, Rank::Five);
    assert_eq!(engine.phase(), Phase::Player);
    assert_eq!(engine.hands()[0].value().total, 21);

    engine.stand(0).unwrap();
    assert_eq!(engine.phase(), Phase::Betting);

    let summary = engine.last_results().unwrap();
    assert_eq!(summary.outcomes(), vec![Outcome::Win]);
    assert_eq!(summary.hands[0].value, 21);
    assert!(!summary.hands[0].blackjack);
    assert_eq!(summary.dealer.value, 17);
    assert_eq!(summary.hands[0].net_cents, 1_000);
    assert_eq!(engine.chips().bankroll_cents, 11_000);
}

#[test]
fn lower_total_loses_and_equal_total_pushes() {
    let mut engine = dealt(
        TableSettings::default(),
        10_000,
        1_000,
        &[Rank::Ten, Rank::Six, Rank::Ten, Rank::Eight],
    );
    engine.stand(0).unwrap();
    assert_eq!(engine.last_results().unwrap().outcomes(), vec![Outcome::Loss]);
    assert_eq!(engine.chips().bankroll_cents, 9_000);

    let mut engine = dealt(
        TableSettings::default(),
        10_000,
        1_000,
        &[Rank::Ten, Rank::Eight, Rank::Ten, Rank::Eight],
    );
    engine.stand(0).unwrap();
    assert_eq!(engine.last_results().unwrap().outcomes(), vec![Outcome::Push]);
    assert_eq!(engine.chips().bankroll_cents, 10_000);
}

#[test]
fn bust_hand_forfeits_exactly_its_bet() {
    let mut engine = dealt(
        TableSettings::default(),
        10_000,
        1_000,
        &[Rank::Ten, Rank::Six, Rank::Ten, Rank::Seven, Rank::King],
    );

    engine.hit(0).unwrap();
    assert_eq!(engine.phase(), Phase::Betting);

    let summary = engine.last_results().unwrap();
    assert_eq!(summary.outcomes(), vec![Outcome::Loss]);
    assert!((summary.hands[0].outcome.score() + 1.0).abs() < f64::EPSILON);
    assert!(summary.hands[0].bust);
    assert_eq!(summary.hands[0].value, 26);
    assert_eq!(engine.chips().bankroll_cents, 9_000);
}

#[test]
fn dealer_bust_pays_every_live_hand() {
    let mut engine = dealt(
        TableSettings::default(),
        10_000,
        1_000,
        &[Rank::Ten, Rank::Two, Rank::Ten, Rank::Six, Rank::Queen],
    );
    engine.stand(0).unwrap();

    let summary = engine.last_results().unwrap();
    assert!(summary.dealer.bust);
    assert_eq!(summary.dealer.value, 26);
    assert_eq!(summary.outcomes(), vec![Outcome::Win]);
    assert_eq!(engine.chips().bankroll_cents, 11_000);
}

#[test]
fn dealer_stands_on_soft_17_by_default() {
    let mut engine = dealt(
        TableSettings::default(),
        10_000,
        1_000,
        &[Rank::Ten, Rank::Eight, Rank::Ace, Rank::Six, Rank::Two],
    );
    engine.stand(0).unwrap();

    let summary = engine.last_results().unwrap();
    assert_eq!(summary.dealer.cards.len(), 2);
    assert_eq!(summary.dealer.value, 17);
    assert_eq!(summary.outcomes(), vec![Outcome::Win]);
}

#[test]
fn dealer_hits_soft_17_when_configured() {
    let settings = TableSettings::default().with_dealer_hits_soft_17(true);
    let mut engine = dealt(
        settings,
        10_000,
        1_000,
        &[Rank::Ten, Rank::Eight, Rank::Ace, Rank::Six, Rank::Two],
    );
    engine.stand(0).unwrap();

    let summary = engine.last_results().unwrap();
    assert_eq!(summary.dealer.cards.len(), 3);
    assert_eq!(summary.dealer.value, 19);
    assert_eq!(summary.outcomes(), vec![Outcome::Loss]);
}

#[test]
fn double_takes_one_card_and_doubles_the_bet() {
    let mut engine = dealt(
        TableSettings::default(),
        10_000,
        1_000,
        &[Rank::Five, Rank::Six, Rank::Ten, Rank::Seven, Rank::Ten],
    );

    let drawn = engine.double(0).unwrap();
    assert_eq!(drawn.rank, Rank::Ten);
    assert_eq!(engine.phase(), Phase::Betting);

    let summary = engine.last_results().unwrap();
    let hand = &summary.hands[0];
    assert!(hand.doubled);
    assert_eq!(hand.cards.len(), 3);
    assert_eq!(hand.bet, 2_000);
    assert_eq!(hand.outcome, Outcome::Win);
    assert_eq!(hand.net_cents, 2_000);
    assert_eq!(engine.chips().bankroll_cents, 12_000);
}

#[test]
fn double_into_bust_forfeits_the_doubled_bet() {
    let mut engine = dealt(
        TableSettings::default(),
        10_000,
        1_000,
        &[Rank::Ten, Rank::Six, Rank::Ten, Rank::Seven, Rank::King],
    );

    let drawn = engine.double(0).unwrap();
    assert_eq!(drawn.rank, Rank::King);
    assert_eq!(engine.phase(), Phase::Betting);

    let summary = engine.last_results().unwrap();
    let hand = &summary.hands[0];
    assert!(hand.doubled);
    assert!(hand.bust);
    assert_eq!(hand.cards.len(), 3);
    assert_eq!(hand.value, 26);
    assert_eq!(hand.bet, 2_000);
    assert_eq!(hand.outcome, Outcome::Loss);
    assert_eq!(hand.net_cents, -2_000);
    assert_eq!(summary.dealer.cards.len(), 2);
    assert_eq!(summary.dealer.value, 17);
    assert_eq!(engine.chips().bankroll_cents, 8_000);
}

#[test]
fn double_refused_without_matching_funds() {
    let mut engine = dealt(
        TableSettings::default(),
        1_000,
        600,
        &[Rank::Five, Rank::Six, Rank::Ten, Rank::Seven, Rank::Ten],
    );
    let hands_before = engine.hands().to_vec();
    let chips_before = engine.chips().clone();

    assert_eq!(engine.double(0).unwrap_err(), ActionError::InsufficientFunds);
    assert_eq!(engine.hands(), hands_before.as_slice());
    assert_eq!(engine.chips(), &chips_before);
    assert!(!engine.hands()[0].is_doubled());
    assert_eq!(engine.hands()[0].bet(), 600);
    assert_eq!(engine.phase(), Phase::Player);
}

#[test]
fn split_creates_adjacent_hands() {
    let mut engine = dealt(
        TableSettings::default(),
        10_000,
        1_000,
        &[Rank::Eight, Rank::Eight, Rank::Ten, Rank::Seven, Rank::Three, Rank::Two],
    );

    engine.split(0).unwrap();

    let hands = engine.hands();
    assert_eq!(hands.len(), 2);
    assert_eq!(hands[0].cards(), &[card(Rank::Eight), card(Rank::Three)]);
    assert_eq!(hands[1].cards(), &[card(Rank::Eight), card(Rank::Two)]);
    assert_eq!(hands[0].bet(), 1_000);
    assert_eq!(hands[1].bet(), 1_000);
    assert_eq!(engine.chips().bankroll_cents, 8_000);
    assert_eq!(engine.chips().bet_cents, 2_000);
    assert_eq!(engine.phase(), Phase::Player);
}

#[test]
fn split_hands_are_played_in_order() {
    let mut engine = dealt(
        TableSettings::default(),
        10_000,
        1_000,
        &[
            Rank::Eight,
            Rank::Eight,
            Rank::Ten,
            Rank::Seven,
            Rank::Ten,
            Rank::Two,
            Rank::Nine,
        ],
    );
    engine.split(0).unwrap();

    engine.stand(0).unwrap();
    assert_eq!(engine.phase(), Phase::Player);
    assert_eq!(engine.active_hand(), Some(1));
    assert_eq!(engine.stand(0).unwrap_err(), ActionError::HandFinished);

    engine.hit(1).unwrap();
    engine.stand(1).unwrap();
    assert_eq!(engine.phase(), Phase::Betting);

    let summary = engine.last_results().unwrap();
    assert_eq!(summary.outcomes(), vec![Outcome::Win, Outcome::Win]);
    assert_eq!(summary.hands[0].value, 18);
    assert_eq!(summary.hands[1].value, 19);
    assert_eq!(engine.chips().bankroll_cents, 12_000);
}

#[test]
fn split_refused_for_non_pairs_and_short_bankroll() {
    let mut engine = dealt(
        TableSettings::default(),
        10_000,
        1_000,
        &[Rank::Eight, Rank::Nine, Rank::Ten, Rank::Seven],
    );
    assert_eq!(engine.split(0).unwrap_err(), ActionError::CannotSplit);
    assert_eq!(engine.hands().len(), 1);
    assert_eq!(engine.hands()[0].len(), 2);

    let mut engine = dealt(
        TableSettings::default(),
        1_000,
        1_000,
        &[Rank::Eight, Rank::Eight, Rank::Ten, Rank::Seven],
    );
    let hands_before = engine.hands().to_vec();
    assert_eq!(engine.split(0).unwrap_err(), ActionError::InsufficientFunds);
    assert_eq!(engine.hands(), hands_before.as_slice());
    assert_eq!(engine.chips().bankroll_cents, 0);
    assert_eq!(engine.deck().remaining(), 0);
}

#[test]
fn split_stops_at_four_hands() {
    let mut engine = dealt(
        TableSettings::default(),
        10_000,
        1_000,
        &[
            Rank::Eight,
            Rank::Eight,
            Rank::Ten,
            Rank::Seven,
            Rank::Eight,
            Rank::Eight,
            Rank::Eight,
            Rank::Eight,
            Rank::Eight,
            Rank::Eight,
        ],
    );

    engine.split(0).unwrap();
    engine.split(0).unwrap();
    engine.split(0).unwrap();
    assert_eq!(engine.hands().len(), 4);
    assert!(engine.hands()[0].is_pair());

    assert_eq!(engine.split(0).unwrap_err(), ActionError::MaxHandsReached);
    assert_eq!(engine.hands().len(), 4);
    assert_eq!(engine.chips().bankroll_cents, 6_000);
}

#[test]
fn surrender_forfeits_half_the_bet() {
    let mut engine = dealt(
        TableSettings::default(),
        10_000,
        1_001,
        &[Rank::Ten, Rank::Six, Rank::Ten, Rank::Seven],
    );

    let refund = engine.surrender(0).unwrap();
    assert_eq!(refund, 500);
    assert_eq!(engine.phase(), Phase::Betting);

    let summary = engine.last_results().unwrap();
    let hand = &summary.hands[0];
    assert_eq!(hand.outcome, Outcome::Surrender);
    assert!((hand.outcome.score() + 0.5).abs() < f64::EPSILON);
    assert!(hand.surrendered);
    assert_eq!(hand.bet, 501);
    assert_eq!(hand.net_cents, -501);
    assert_eq!(engine.chips().bankroll_cents, 10_000 - 501);
    assert_eq!(engine.chips().net_cents, -501);
}

#[test]
fn surrender_refused_when_disabled() {
    let settings = TableSettings::default().with_allow_surrender(false);
    let mut engine = dealt(
        settings,
        10_000,
        1_000,
        &[Rank::Ten, Rank::Six, Rank::Ten, Rank::Seven],
    );

    assert_eq!(engine.surrender(0).unwrap_err(), ActionError::SurrenderNotAllowed);
    assert!(!engine.hands()[0].is_surrendered());
    assert_eq!(engine.chips().bankroll_cents, 9_000);
    assert_eq!(engine.phase(), Phase::Player);
}

#[test]
fn actions_outside_player_phase_are_refused() {
    let mut engine = table(TableSettings::default(), 10_000, &[Rank::Two]);

    assert_eq!(engine.hit(0).unwrap_err(), ActionError::InvalidState);
    assert_eq!(engine.stand(0).unwrap_err(), ActionError::InvalidState);
    assert_eq!(engine.double(0).unwrap_err(), ActionError::InvalidState);
    assert_eq!(engine.split(0).unwrap_err(), ActionError::InvalidState);
    assert_eq!(engine.surrender(0).unwrap_err(), ActionError::InvalidState);
    assert_eq!(engine.deck().remaining(), 1);
}

#[test]
fn unknown_hand_index_is_refused() {
    let mut engine = dealt(
        TableSettings::default(),
        10_000,
        1_000,
        &[Rank::Ten, Rank::Six, Rank::Ten, Rank::Seven],
    );
    assert_eq!(engine.hit(3).unwrap_err(), ActionError::HandNotFound);
    assert_eq!(engine.hands()[0].len(), 2);
}

#[test]
fn bets_are_locked_during_a_round() {
    let mut engine = dealt(
        TableSettings::default(),
        10_000,
        1_000,
        &[Rank::Ten, Rank::Six, Rank::Ten, Rank::Seven],
    );
    assert_eq!(engine.place_bet(100).unwrap_err(), BetError::InvalidState);
    assert_eq!(engine.start_round().unwrap_err(), DealError::InvalidState);
    assert_eq!(
        engine.set_settings(TableSettings::default()).unwrap_err(),
        SettingsError::RoundInProgress
    );
}

#[test]
fn closing_the_table_returns_the_staged_bet() {
    let mut engine = table(TableSettings::default(), 10_000, &[Rank::Two]);
    engine.place_bet(2_000).unwrap();

    engine.close_table().unwrap();
    assert_eq!(engine.phase(), Phase::Idle);
    assert_eq!(engine.chips().bankroll_cents, 10_000);
    assert_eq!(engine.place_bet(100).unwrap_err(), BetError::InvalidState);
    assert_eq!(engine.start_round().unwrap_err(), DealError::InvalidState);

    engine.open_table().unwrap();
    assert_eq!(engine.phase(), Phase::Betting);
    assert_eq!(engine.open_table().unwrap_err(), BetError::InvalidState);
}

#[test]
fn rebet_repeats_the_previous_opening_bet() {
    let mut engine = dealt(
        TableSettings::default(),
        10_000,
        1_000,
        &[Rank::Ten, Rank::Eight, Rank::Ten, Rank::Eight],
    );
    engine.stand(0).unwrap();
    assert_eq!(engine.chips().bet_cents, 0);

    engine.rebet().unwrap();
    assert_eq!(engine.chips().bet_cents, 1_000);
    assert_eq!(engine.clear_bet().unwrap(), 1_000);
    assert_eq!(engine.chips().bankroll_cents, 10_000);
}

#[test]
fn settings_and_bankroll_persist() {
    let mut store = MemoryStore::new();
    let settings = TableSettings::default()
        .with_dealer_hits_soft_17(true)
        .with_blackjack_pays(BlackjackPays::SixToFive)
        .with_decks(1);

    let mut engine = BlackjackEngine::with_seed(settings.clone(), Chips::new(5_000), 3);
    engine.place_bet(1_000).unwrap();
    engine.save(&mut store).unwrap();

    let restored = BlackjackEngine::load(&store, 4);
    assert_eq!(restored.settings(), &settings);
    assert_eq!(restored.chips().bankroll_cents, 5_000);
    assert_eq!(restored.chips().bet_cents, 0);
    assert_eq!(restored.deck().total_cards(), 52);
    assert_eq!(restored.phase(), Phase::Betting);
}

#[test]
fn shoe_table_plays_many_rounds_without_losing_chips() {
    let mut engine =
        BlackjackEngine::with_seed(TableSettings::default(), Chips::new(1_000_000), 11);

    for _ in 0..200 {
        engine.place_bet(100).unwrap();
        if engine.start_round().unwrap() == RoundStart::InPlay {
            while let Some(index) = engine.active_hand() {
                if engine.hands()[index].value().total < 17 {
                    engine.hit(index).unwrap();
                } else {
                    engine.stand(index).unwrap();
                }
            }
        }
        assert_eq!(engine.phase(), Phase::Betting);
        assert_eq!(engine.chips().bet_cents, 0);

        let summary = engine.last_results().unwrap();
        let expected = i64::try_from(engine.chips().bankroll_cents).unwrap() - 1_000_000;
        assert_eq!(engine.chips().net_cents, expected);
        assert_eq!(summary.bankroll_cents, engine.chips().bankroll_cents);
    }
}
