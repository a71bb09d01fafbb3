//! Scripted walkthroughs of the exercise subjects.
//!
//! Each walkthrough records the expression it evaluates and the resulting
//! value, the way one would step through the code and print variables.
//! Every step is also emitted as a `debug` event.

use crate::core::ranking::{self, spades_high, SortKey};
use crate::domain::card::{Card, Rank, Suit};
use crate::domain::deck::{high_card, FrenchDeck, CLASSIC_SUIT_ORDER};
use crate::domain::vector::Vector;
use crate::utils::error::Result;
use rand::Rng;
use std::collections::HashSet;
use std::hint::black_box;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, Default)]
pub struct Walkthrough {
    pub title: String,
    pub steps: Vec<Step>,
}

impl Walkthrough {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            steps: Vec::new(),
        }
    }

    fn record(&mut self, label: impl Into<String>, value: impl ToString) {
        let step = Step {
            label: label.into(),
            value: value.to_string(),
        };
        tracing::debug!(walkthrough = %self.title, step = %step.label, value = %step.value);
        self.steps.push(step);
    }

    pub fn value_of(&self, label: &str) -> Option<&str> {
        self.steps
            .iter()
            .find(|step| step.label == label)
            .map(|step| step.value.as_str())
    }

    pub fn render(&self) -> String {
        let width = self.steps.iter().map(|s| s.label.len()).max().unwrap_or(0);
        let mut out = format!("=== {} ===\n", self.title);
        for step in &self.steps {
            out.push_str(&format!("{:<width$}  {}\n", step.label, step.value, width = width));
        }
        out
    }
}

fn join_cards<'a>(cards: impl IntoIterator<Item = &'a Card>) -> String {
    cards
        .into_iter()
        .map(Card::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn deck_walkthrough<R: Rng + ?Sized>(rng: &mut R) -> Result<Walkthrough> {
    let mut walk = Walkthrough::new("French deck");
    let deck = FrenchDeck::new();

    walk.record("len(deck)", deck.len());
    walk.record("deck[0]", deck.at(0)?);
    walk.record("deck[-1]", deck.at(-1)?);
    walk.record("deck[:3]", join_cards(deck.slice(0..3)?));
    walk.record("deck[12::13]", join_cards(deck.iter().skip(12).step_by(13)));
    walk.record("first 5 by iteration", join_cards(deck.iter().take(5)));
    walk.record("last 2 reversed", join_cards(deck.iter().rev().take(2)));

    if let Some(card) = deck.choose_with(rng) {
        walk.record("random choice", card);
    }

    let ace_of_spades = Card::new(Rank::Ace, Suit::Spades);
    walk.record("Ace of Spades in deck", deck.contains(&ace_of_spades));
    walk.record(
        "Queen of Hearts in empty deck",
        FrenchDeck::from_cards(Vec::new()).contains(&Card::new(Rank::Queen, Suit::Hearts)),
    );

    let by_spades_high = ranking::sorted(&deck, SortKey::SpadesHigh);
    walk.record("lowest (spades high)", by_spades_high[0]);
    walk.record("highest (spades high)", by_spades_high[by_spades_high.len() - 1]);
    walk.record("spades_high(Ace of Spades)", spades_high(&ace_of_spades));

    let hearts = deck.cards_by_suit(Suit::Hearts);
    walk.record("hearts", hearts.len());
    walk.record("high card of hearts", high_card(&hearts)?);

    let mut shuffled = deck.clone();
    shuffled.shuffle_with(rng);
    walk.record("shuffled[:3]", join_cards(shuffled.slice(0..3)?));
    shuffled.sort(true);
    walk.record("sorted back equals fresh deck", shuffled == deck);

    Ok(walk)
}

pub fn vector_walkthrough() -> Result<Walkthrough> {
    let mut walk = Walkthrough::new("Vector");
    let v1 = Vector::new(2.0, 4.0);
    let v2 = Vector::new(2.0, 1.0);
    let zero = Vector::default();

    walk.record("v1", v1);
    walk.record("v2", v2);
    walk.record("v1 + v2", v1 + v2);
    walk.record("v1 - v2", v1 - v2);
    walk.record("v1 * 3", v1 * 3.0);
    walk.record("3 * v1", 3.0 * v1);
    walk.record("-v1", -v1);
    walk.record("abs(Vector(3, 4))", Vector::new(3.0, 4.0).magnitude());
    walk.record("abs(v1)", format!("{:.6}", v1.magnitude()));
    walk.record("bool(v1)", !v1.is_zero());
    walk.record("bool(zero)", !zero.is_zero());
    walk.record("v1.normalized()", v1.normalized()?);
    walk.record("v1 . v2", v1.dot(v2));
    walk.record("v1 x v2", v1.cross(v2));
    walk.record("v1.angle()", format!("{:.3}", v1.angle()));
    walk.record("v1.distance_to(v2)", v1.distance_to(v2));
    walk.record(
        "zero.normalized()",
        match zero.normalized() {
            Ok(v) => v.to_string(),
            Err(e) => format!("error: {}", e),
        },
    );

    let unique: HashSet<Vector> = [v1, v2, Vector::new(2.0, 4.0), zero].into_iter().collect();
    walk.record("len({v1, v2, Vector(2, 4), zero})", unique.len());

    Ok(walk)
}

/// Contrasts the textbook deck layout with the robust one.
pub fn compare_decks() -> Result<Walkthrough> {
    let mut walk = Walkthrough::new("Classic vs robust deck");
    let classic = FrenchDeck::classic();
    let robust = FrenchDeck::new();

    walk.record("classic suit order", join_suits(&CLASSIC_SUIT_ORDER));
    walk.record("robust suit order", join_suits(&Suit::ALL));
    walk.record("len (classic / robust)", format!("{} / {}", classic.len(), robust.len()));
    walk.record("classic[13]", classic.at(13)?);
    walk.record("robust[13]", robust.at(13)?);
    walk.record("classic[-1]", classic.at(-1)?);
    walk.record("robust[-1]", robust.at(-1)?);

    let same_cards: HashSet<&Card> = classic.iter().collect();
    walk.record(
        "same 52 cards",
        robust.iter().all(|card| same_cards.contains(card)),
    );

    let positions_differ = classic
        .iter()
        .zip(robust.iter())
        .filter(|(a, b)| a != b)
        .count();
    walk.record("positions that differ", positions_differ);

    walk.record(
        "spades-high order agrees",
        ranking::sorted(&classic, SortKey::SpadesHigh)
            == ranking::sorted(&robust, SortKey::SpadesHigh),
    );

    // 型別安全：無效的點數與花色在解析時就被拒絕
    walk.record(
        "Rank::from_symbol(\"invalid_rank\")",
        format!("{:?}", Rank::from_symbol("invalid_rank")),
    );
    walk.record(
        "Suit::from_name(\"invalid_suit\")",
        format!("{:?}", Suit::from_name("invalid_suit")),
    );
    walk.record("Ace of Spades > King of Hearts", ace_beats_king());

    Ok(walk)
}

fn ace_beats_king() -> bool {
    Card::new(Rank::Ace, Suit::Spades) > Card::new(Rank::King, Suit::Hearts)
}

fn time_rounds<T>(rounds: u32, mut op: impl FnMut() -> T) -> Duration {
    let start = Instant::now();
    for _ in 0..rounds {
        black_box(op());
    }
    start.elapsed()
}

fn deck_memory(deck: &FrenchDeck) -> usize {
    std::mem::size_of_val(deck) + std::mem::size_of_val(deck.as_slice())
}

/// Times deck building, card building and indexing for both layouts and
/// reports the memory each deck holds.
pub fn performance_comparison() -> Walkthrough {
    let mut walk = Walkthrough::new("Performance: classic vs robust deck");

    let classic_build = time_rounds(1_000, FrenchDeck::classic);
    let robust_build = time_rounds(1_000, FrenchDeck::new);
    walk.record(
        "deck creation (1k)",
        format!("{:.4}s / {:.4}s", classic_build.as_secs_f64(), robust_build.as_secs_f64()),
    );

    let card_build = time_rounds(10_000, || Card::new(Rank::Ace, Suit::Spades));
    walk.record("card creation (10k)", format!("{:.4}s", card_build.as_secs_f64()));

    let classic = FrenchDeck::classic();
    let robust = FrenchDeck::new();
    let classic_access = time_rounds(100_000, || classic.get(black_box(25)).copied());
    let robust_access = time_rounds(100_000, || robust.get(black_box(25)).copied());
    walk.record(
        "card access (100k)",
        format!("{:.4}s / {:.4}s", classic_access.as_secs_f64(), robust_access.as_secs_f64()),
    );

    walk.record(
        "memory per deck",
        format!("{} bytes / {} bytes", deck_memory(&classic), deck_memory(&robust)),
    );
    walk.record("memory per card", format!("{} bytes", std::mem::size_of::<Card>()));

    walk
}

/// The textbook vector only adds, scales, measures and tests truthiness;
/// the robust one adds the rest.
pub fn compare_vectors() -> Result<Walkthrough> {
    let mut walk = Walkthrough::new("Vector: textbook vs robust operations");
    let v1 = Vector::new(3.0, 4.0);
    let v2 = Vector::new(2.0, 1.0);

    walk.record("textbook: v1 + v2", v1 + v2);
    walk.record("textbook: v1 * 2", v1 * 2.0);
    walk.record("textbook: abs(v1)", v1.magnitude());
    walk.record("textbook: bool(v1)", !v1.is_zero());

    walk.record("robust: v1 - v2", v1 - v2);
    walk.record("robust: 2 * v1", 2.0 * v1);
    walk.record("robust: v1 . v2", v1.dot(v2));
    walk.record("robust: v1.angle()", format!("{:.3}", v1.angle()));
    walk.record("robust: v1.distance_to(v2)", format!("{:.3}", v1.distance_to(v2)));
    let unit = v1.normalized()?;
    walk.record("robust: v1.normalized()", unit);
    walk.record("robust: abs(v1.normalized())", format!("{:.6}", unit.magnitude()));

    let unique: HashSet<Vector> = [v1, v2, Vector::new(3.0, 4.0)].into_iter().collect();
    walk.record("robust: len({v1, v2, Vector(3, 4)})", unique.len());
    walk.record(
        "robust: Vector(0, 0).normalized()",
        match Vector::zero().normalized() {
            Ok(v) => v.to_string(),
            Err(e) => format!("error: {}", e),
        },
    );

    Ok(walk)
}

fn join_suits(suits: &[Suit]) -> String {
    suits
        .iter()
        .map(|suit| suit.name().to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}
