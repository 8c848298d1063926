use std::fmt;

use serde::Serialize;

use crate::{
    deck::{parse_card, Card},
    error::Error,
};

/// Returns the best total and whether an ace is still counted as 11 in it.
pub fn hand_value(cards: &[Card]) -> (u8, bool) {
    let mut total: u8 = 0;
    let mut aces = 0;

    for card in cards {
        total = total.saturating_add(card.value());
        if card.is_ace() {
            aces += 1;
        }
    }

    while total > 21 && aces > 0 {
        total -= 10;
        aces -= 1;
    }

    (total, aces > 0)
}

/// Immutable sequence of cards. Adding a card consumes the hand and returns a
/// new one; branches that need the old hand clone it first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Hand { cards: Vec::new() }
    }

    pub fn from_cards<I: IntoIterator<Item = Card>>(cards: I) -> Self {
        Hand {
            cards: cards.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn with_card(mut self, card: Card) -> Self {
        self.cards.push(card);
        self
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn total(&self) -> u8 {
        hand_value(&self.cards).0
    }

    pub fn is_soft(&self) -> bool {
        let (total, ace_as_eleven) = hand_value(&self.cards);
        ace_as_eleven && (12..=21).contains(&total)
    }

    pub fn is_blackjack(&self) -> bool {
        self.cards.len() == 2 && self.total() == 21
    }

    pub fn is_busted(&self) -> bool {
        self.total() > 21
    }

    pub fn can_split(&self) -> bool {
        match self.cards.as_slice() {
            [first, second] => first.rank() == second.rank(),
            _ => false,
        }
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, card) in self.cards.iter().enumerate() {
            if index > 0 {
                f.write_str(",")?;
            }
            write!(f, "{card}")?;
        }
        Ok(())
    }
}

/// Builds a hand from rank tokens, failing on the first invalid one.
pub fn parse_hand<I, S>(tokens: I) -> Result<Hand, Error>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens
        .into_iter()
        .map(|token| parse_card(token.as_ref()))
        .collect::<Result<Vec<_>, _>>()
        .map(Hand::from_cards)
}
