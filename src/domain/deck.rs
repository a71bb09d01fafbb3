use crate::domain::card::{Card, Rank, Suit};
use crate::utils::error::{Result, WorkbenchError};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, Range};

pub const DECK_SIZE: usize = 52;

/// Suit order of the textbook deck: spades, diamonds, clubs, hearts.
pub const CLASSIC_SUIT_ORDER: [Suit; 4] = [Suit::Spades, Suit::Diamonds, Suit::Clubs, Suit::Hearts];

/// A deck of French playing cards that behaves like a read-mostly sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrenchDeck {
    cards: Vec<Card>,
}

impl FrenchDeck {
    /// Full deck, suits in `Suit::ALL` order and ranks ascending within a suit.
    pub fn new() -> Self {
        Self::with_suit_order(&Suit::ALL)
    }

    /// Full deck laid out in the textbook's suit order.
    pub fn classic() -> Self {
        Self::with_suit_order(&CLASSIC_SUIT_ORDER)
    }

    fn with_suit_order(suits: &[Suit]) -> Self {
        let cards = suits
            .iter()
            .flat_map(|&suit| Rank::all().map(move |rank| Card::new(rank, suit)))
            .collect();
        Self { cards }
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    /// Looks a card up by position; negative positions count from the end.
    pub fn at(&self, position: isize) -> Result<&Card> {
        let len = self.cards.len();
        let resolved = if position < 0 {
            len.checked_sub(position.unsigned_abs())
        } else {
            Some(position.unsigned_abs())
        };

        resolved
            .and_then(|index| self.cards.get(index))
            .ok_or(WorkbenchError::IndexOutOfRange { position, len })
    }

    pub fn slice(&self, range: Range<usize>) -> Result<&[Card]> {
        let len = self.cards.len();
        if range.start > range.end {
            return Err(WorkbenchError::IndexOutOfRange {
                position: range.start as isize,
                len,
            });
        }
        self.cards
            .get(range.clone())
            .ok_or(WorkbenchError::IndexOutOfRange {
                position: range.end as isize,
                len,
            })
    }

    pub fn contains(&self, card: &Card) -> bool {
        self.cards.contains(card)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Card> {
        self.cards.iter()
    }

    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }

    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    pub fn shuffle(&mut self) {
        self.shuffle_with(&mut rand::thread_rng());
    }

    pub fn choose_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Card> {
        self.cards.choose(rng)
    }

    pub fn choose(&self) -> Option<&Card> {
        self.choose_with(&mut rand::thread_rng())
    }

    /// Sorts in place, by rank then suit, or by suit then rank.
    pub fn sort(&mut self, by_suit: bool) {
        if by_suit {
            self.cards.sort_by_key(|card| (card.suit, card.rank));
        } else {
            self.cards.sort();
        }
    }

    pub fn cards_by_suit(&self, suit: Suit) -> Vec<Card> {
        self.cards
            .iter()
            .filter(|card| card.suit == suit)
            .copied()
            .collect()
    }

    pub fn into_vec(self) -> Vec<Card> {
        self.cards
    }
}

impl Default for FrenchDeck {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FrenchDeck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "French deck with {} cards", self.cards.len())
    }
}

impl Index<usize> for FrenchDeck {
    type Output = Card;

    fn index(&self, index: usize) -> &Self::Output {
        &self.cards[index]
    }
}

impl IntoIterator for FrenchDeck {
    type Item = Card;
    type IntoIter = std::vec::IntoIter<Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.into_iter()
    }
}

impl<'a> IntoIterator for &'a FrenchDeck {
    type Item = &'a Card;
    type IntoIter = std::slice::Iter<'a, Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.iter()
    }
}

impl FromIterator<Card> for FrenchDeck {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        Self {
            cards: iter.into_iter().collect(),
        }
    }
}

/// Highest-ranked card; the first one wins a tie.
pub fn high_card(cards: &[Card]) -> Result<Card> {
    let mut iter = cards.iter().copied();
    let first = iter.next().ok_or_else(|| WorkbenchError::EmptySequence {
        operation: "find high card".to_string(),
    })?;
    Ok(iter.fold(first, |best, card| if card.rank > best.rank { card } else { best }))
}
