use crate::domain::card::{Card, Suit};
use crate::domain::deck::FrenchDeck;
use std::cmp::Reverse;

/// Bridge suit values used by the spades-high ordering.
pub fn suit_value(suit: Suit) -> u32 {
    match suit {
        Suit::Spades => 3,
        Suit::Hearts => 2,
        Suit::Diamonds => 1,
        Suit::Clubs => 0,
    }
}

/// Ranks every card of the deck uniquely: 0 is the 2 of Clubs, 51 the Ace of Spades.
pub fn spades_high(card: &Card) -> u32 {
    u32::from(card.rank.index()) * 4 + suit_value(card.suit)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    SpadesHigh,
    RankThenSuit,
    SuitThenRank,
}

/// Returns the deck's cards in ascending order of `key`, leaving the deck untouched.
pub fn sorted(deck: &FrenchDeck, key: SortKey) -> Vec<Card> {
    let mut cards = deck.as_slice().to_vec();
    match key {
        SortKey::SpadesHigh => cards.sort_by_key(spades_high),
        SortKey::RankThenSuit => cards.sort(),
        SortKey::SuitThenRank => cards.sort_by_key(|card| (card.suit, card.rank)),
    }
    cards
}

/// Highest cards first under the spades-high ordering.
pub fn top_cards(deck: &FrenchDeck, count: usize) -> Vec<Card> {
    let mut cards = deck.as_slice().to_vec();
    cards.sort_by_key(|card| Reverse(spades_high(card)));
    cards.truncate(count);
    cards
}
