//! Builds the deck and vector views printed by the `deck` and `vector`
//! commands.

use crate::core::ranking::{self, SortKey};
use crate::domain::deck::FrenchDeck;
use crate::domain::vector::Vector;
use crate::utils::error::{Result, WorkbenchError};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeckOptions {
    /// Textbook suit order instead of the robust one
    pub classic: bool,
    pub shuffle: bool,
    /// A seed implies a shuffle
    pub seed: Option<u64>,
    pub sort: Option<SortKey>,
}

/// Builds a deck, then shuffles, then sorts, in that order.
pub fn build_deck(options: &DeckOptions) -> FrenchDeck {
    let mut deck = if options.classic {
        FrenchDeck::classic()
    } else {
        FrenchDeck::new()
    };

    match options.seed {
        Some(seed) => deck.shuffle_with(&mut StdRng::seed_from_u64(seed)),
        None if options.shuffle => deck.shuffle(),
        None => {}
    }

    match options.sort {
        Some(SortKey::RankThenSuit) => deck.sort(false),
        Some(SortKey::SuitThenRank) => deck.sort(true),
        Some(SortKey::SpadesHigh) => {
            deck = FrenchDeck::from_cards(ranking::sorted(&deck, SortKey::SpadesHigh))
        }
        None => {}
    }

    deck
}

/// Describes one vector (`x y`) or a pair of vectors (`x1 y1 x2 y2`).
pub fn describe_vectors(components: &[f64]) -> Result<Vec<String>> {
    match components {
        [x, y] => {
            let v = Vector::new(*x, *y);
            let mut lines = vec![
                format!("v = {}", v),
                format!("abs(v) = {}", v.magnitude()),
                format!("bool(v) = {}", !v.is_zero()),
                format!("angle = {:.6} rad", v.angle()),
                format!("perpendicular = {}", v.perpendicular()),
            ];
            match v.normalized() {
                Ok(unit) => lines.push(format!("normalized = {}", unit)),
                Err(e) => lines.push(format!("normalized: {}", e)),
            }
            Ok(lines)
        }
        [x1, y1, x2, y2] => {
            let a = Vector::new(*x1, *y1);
            let b = Vector::new(*x2, *y2);
            let mut lines = vec![
                format!("a = {}", a),
                format!("b = {}", b),
                format!("a + b = {}", a + b),
                format!("a - b = {}", a - b),
                format!("a . b = {}", a.dot(b)),
                format!("a x b = {}", a.cross(b)),
                format!("distance = {}", a.distance_to(b)),
                format!("a == b: {}", a == b),
            ];
            match a.angle_with(b) {
                Ok(angle) => lines.push(format!("angle between = {:.6} rad", angle)),
                Err(e) => lines.push(format!("angle between: {}", e)),
            }
            match a.project_onto(b) {
                Ok(p) => lines.push(format!("a projected onto b = {}", p)),
                Err(e) => lines.push(format!("projection: {}", e)),
            }
            Ok(lines)
        }
        _ => Err(WorkbenchError::InvalidConfigValueError {
            field: "components".to_string(),
            value: format!("{:?}", components),
            reason: "Expected 2 numbers (one vector) or 4 numbers (two vectors)".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::card::{Card, Rank, Suit};

    #[test]
    fn test_default_options_give_fresh_deck() {
        assert_eq!(build_deck(&DeckOptions::default()), FrenchDeck::new());

        let classic = build_deck(&DeckOptions {
            classic: true,
            ..DeckOptions::default()
        });
        assert_eq!(classic, FrenchDeck::classic());
    }

    #[test]
    fn test_seed_implies_reproducible_shuffle() {
        let options = DeckOptions {
            seed: Some(42),
            ..DeckOptions::default()
        };
        let first = build_deck(&options);
        let second = build_deck(&options);

        assert_eq!(first, second);
        assert_ne!(first, FrenchDeck::new());
        assert_eq!(first.len(), 52);
    }

    #[test]
    fn test_sort_runs_after_shuffle() {
        let by_spades_high = build_deck(&DeckOptions {
            seed: Some(7),
            sort: Some(SortKey::SpadesHigh),
            ..DeckOptions::default()
        });
        assert_eq!(by_spades_high.at(0).unwrap(), &Card::new(Rank::Two, Suit::Clubs));
        assert_eq!(by_spades_high.at(-1).unwrap(), &Card::new(Rank::Ace, Suit::Spades));

        let by_suit = build_deck(&DeckOptions {
            shuffle: true,
            sort: Some(SortKey::SuitThenRank),
            ..DeckOptions::default()
        });
        assert_eq!(by_suit, FrenchDeck::new());

        let by_rank = build_deck(&DeckOptions {
            classic: true,
            sort: Some(SortKey::RankThenSuit),
            ..DeckOptions::default()
        });
        assert_eq!(by_rank.at(0).unwrap(), &Card::new(Rank::Two, Suit::Spades));
        assert_eq!(by_rank.at(1).unwrap(), &Card::new(Rank::Two, Suit::Hearts));
    }

    #[test]
    fn test_describe_one_vector() {
        let lines = describe_vectors(&[3.0, 4.0]).unwrap();
        assert_eq!(lines[0], "v = Vector(3, 4)");
        assert_eq!(lines[1], "abs(v) = 5");
        assert!(lines.contains(&"normalized = Vector(0.6, 0.8)".to_string()));

        let zero = describe_vectors(&[0.0, 0.0]).unwrap();
        assert!(zero.contains(&"bool(v) = false".to_string()));
        assert!(zero.last().unwrap().starts_with("normalized: "));
    }

    #[test]
    fn test_describe_two_vectors() {
        let lines = describe_vectors(&[2.0, 4.0, 2.0, 1.0]).unwrap();
        assert!(lines.contains(&"a + b = Vector(4, 5)".to_string()));
        assert!(lines.contains(&"a . b = 8".to_string()));
        assert!(lines.contains(&"a == b: false".to_string()));
    }

    #[test]
    fn test_describe_rejects_other_arities() {
        for components in [&[1.0][..], &[1.0, 2.0, 3.0][..], &[][..]] {
            assert!(matches!(
                describe_vectors(components),
                Err(WorkbenchError::InvalidConfigValueError { .. })
            ));
        }
    }
}
