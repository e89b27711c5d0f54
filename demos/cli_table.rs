//! Terminal blackjack table.
//!
//! Usage: `cargo run --example cli_table [store.json]`. Settings and bankroll
//! are kept in the given file (default `bjtable.json`).

use std::io::{self, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use bjtable::{
    BlackjackEngine, Card, Deck, DealerHand, Hand, JsonFileStore, Outcome, RoundStart, Settlement,
    Suit,
};
use tracing::Level;

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(Level::WARN)
        .with_writer(io::stderr)
        .init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "bjtable.json".to_string());
    let mut store = match JsonFileStore::open(&path) {
        Ok(store) => store,
        Err(err) => {
            eprintln!("Cannot open {path}: {err}");
            return;
        }
    };

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let mut engine = BlackjackEngine::load(&store, seed);

    println!("Blackjack (type 'q' to quit)");

    loop {
        let bankroll = engine.chips().bankroll_cents;
        if bankroll == 0 {
            println!("You are out of chips. Game over.");
            break;
        }

        let last = engine.chips().last_bet_cents;
        let prompt = format!(
            "Bankroll {}. Bet in cents (enter repeats {}, 0 to quit): ",
            format_cents(bankroll),
            format_cents(last)
        );
        let Some(bet) = prompt_bet(&prompt) else {
            break;
        };

        let staged = match bet {
            Some(0) => break,
            Some(cents) => engine.place_bet(cents),
            None => engine.rebet(),
        };
        if let Err(err) = staged {
            println!("Bet error: {err}");
            continue;
        }

        match engine.start_round() {
            Ok(RoundStart::Settled(summary)) => {
                println!("Natural!");
                print_settlement(&summary);
            }
            Ok(RoundStart::InPlay) => {
                if !play_hands(&mut engine) {
                    // Not saved: the table reloads as of the last finished round.
                    return;
                }
            }
            Err(err) => println!("Deal error: {err}"),
        }

        if let Err(err) = engine.save(&mut store) {
            eprintln!("Could not save table: {err}");
        }
    }

    if let Err(err) = engine.save(&mut store) {
        eprintln!("Could not save table: {err}");
    }
}

/// Plays the round out. Returns `false` if the player quit.
fn play_hands<D: Deck>(engine: &mut BlackjackEngine<D>) -> bool {
    while let Some(index) = engine.active_hand() {
        print_table(engine, index);
        println!("{}", format_actions(engine, index));

        let result = match prompt_line("Action: ").as_str() {
            "h" | "hit" => engine.hit(index).map(|_| ()),
            "s" | "stand" => engine.stand(index),
            "d" | "double" => engine.double(index).map(|_| ()),
            "p" | "split" => engine.split(index),
            "u" | "surrender" => engine.surrender(index).map(|_| ()),
            "q" | "quit" => return false,
            _ => {
                println!("Unknown action.");
                continue;
            }
        };

        if let Err(err) = result {
            println!("Action error: {err}");
        }
    }

    if let Some(summary) = engine.last_results() {
        print_settlement(summary);
    }
    true
}

fn prompt_line(prompt: &str) -> String {
    print!("{prompt}");
    let _ = io::stdout().flush();

    let mut input = String::new();
    match io::stdin().read_line(&mut input) {
        Ok(0) | Err(_) => return "q".to_string(),
        Ok(_) => {}
    }
    input.trim().to_lowercase()
}

/// Returns `None` to quit, `Some(None)` to repeat the last bet.
fn prompt_bet(prompt: &str) -> Option<Option<u64>> {
    loop {
        let input = prompt_line(prompt);
        match input.as_str() {
            "q" | "quit" => return None,
            "" => return Some(None),
            _ => match input.parse::<u64>() {
                Ok(value) => return Some(Some(value)),
                Err(_) => println!("Please enter a number."),
            },
        }
    }
}

fn print_table<D: Deck>(engine: &BlackjackEngine<D>, active: usize) {
    let dealer = engine.dealer();
    println!(
        "\nDealer: {} (showing {})",
        format_dealer(dealer),
        dealer.visible_value().total
    );

    for (index, hand) in engine.hands().iter().enumerate() {
        let marker = if index == active { "*" } else { " " };
        println!(
            "{} Hand {}: {} | value {} | bet {}",
            marker,
            index,
            format_cards(hand.cards()),
            hand.value().total,
            format_cents(hand.bet())
        );
    }
    println!();
}

fn print_settlement(summary: &Settlement) {
    println!(
        "\nDealer: {} (value {}{})",
        format_cards(&summary.dealer.cards),
        summary.dealer.value,
        if summary.dealer.bust { ", bust" } else { "" }
    );
    for (index, hand) in summary.hands.iter().enumerate() {
        let outcome = match hand.outcome {
            Outcome::Win if hand.blackjack => colorize("blackjack", "32"),
            Outcome::Win => colorize("win", "32"),
            Outcome::Push => colorize("push", "33"),
            Outcome::Loss => colorize("loss", "31"),
            Outcome::Surrender => colorize("surrender", "90"),
        };
        println!(
            "Hand {}: {} | value {} | {} ({:+})",
            index,
            format_cards(&hand.cards),
            hand.value,
            outcome,
            hand.net_cents
        );
    }
    println!("Bankroll: {}\n", format_cents(summary.bankroll_cents));
}

fn format_actions<D: Deck>(engine: &BlackjackEngine<D>, index: usize) -> String {
    let Some(hand) = engine.hand(index) else {
        return String::new();
    };
    let funds = engine.chips().can_afford(hand.bet());
    let can_split = is_splittable(engine, hand) && funds;
    let can_surrender = engine.settings().allow_surrender;

    let parts = [
        format_action("hit", "h", true),
        format_action("stand", "s", true),
        format_action("double", "d", funds),
        format_action("split", "p", can_split),
        format_action("surrender", "u", can_surrender),
    ];
    format!("Actions: {}", parts.join(" "))
}

fn is_splittable<D: Deck>(engine: &BlackjackEngine<D>, hand: &Hand) -> bool {
    hand.is_pair() && engine.hands().len() < bjtable::MAX_HANDS
}

fn format_action(label: &str, key: &str, allowed: bool) -> String {
    let text = format!("[{key}]{label}");
    if allowed {
        colorize(&text, "32")
    } else {
        colorize(&text, "90")
    }
}

fn colorize(text: &str, code: &str) -> String {
    format!("\u{1b}[{code}m{text}\u{1b}[0m")
}

fn format_cents(cents: u64) -> String {
    format!("{}.{:02}", cents / 100, cents % 100)
}

fn format_dealer(dealer: &DealerHand) -> String {
    if dealer.is_hole_revealed() {
        return format_cards(dealer.cards());
    }
    let mut parts = Vec::new();
    if let Some(card) = dealer.up_card() {
        parts.push(format_card(card));
    }
    if dealer.len() > 1 {
        parts.push("??".to_string());
    }
    parts.join(" ")
}

fn format_cards(cards: &[Card]) -> String {
    if cards.is_empty() {
        return "(empty)".to_string();
    }
    cards.iter().map(format_card).collect::<Vec<_>>().join(" ")
}

fn format_card(card: &Card) -> String {
    let color_code = match card.suit {
        Suit::Hearts | Suit::Diamonds => "31",
        Suit::Clubs | Suit::Spades => "34",
    };
    colorize(&card.to_string(), color_code)
}
