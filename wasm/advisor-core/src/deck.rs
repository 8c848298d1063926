use std::{fmt, str::FromStr};

use rand::{rngs::SmallRng, Rng, SeedableRng};
use serde::Serialize;

use crate::error::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Rank {
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "4")]
    Four,
    #[serde(rename = "5")]
    Five,
    #[serde(rename = "6")]
    Six,
    #[serde(rename = "7")]
    Seven,
    #[serde(rename = "8")]
    Eight,
    #[serde(rename = "9")]
    Nine,
    #[serde(rename = "10")]
    Ten,
    #[serde(rename = "J")]
    Jack,
    #[serde(rename = "Q")]
    Queen,
    #[serde(rename = "K")]
    King,
    #[serde(rename = "A")]
    Ace,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        }
    }

    fn from_symbol(symbol: &str) -> Option<Rank> {
        Rank::ALL.into_iter().find(|rank| rank.symbol() == symbol)
    }
}

/// A single playing card. Only the rank matters; suits are never modelled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Card {
    rank: Rank,
}

impl Card {
    pub fn new(rank: Rank) -> Self {
        Card { rank }
    }

    pub fn rank(&self) -> Rank {
        self.rank
    }

    /// Blackjack value with aces at 11. Demotion to 1 happens at hand level.
    pub fn value(&self) -> u8 {
        match self.rank {
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten | Rank::Jack | Rank::Queen | Rank::King => 10,
            Rank::Ace => 11,
        }
    }

    pub fn is_ace(&self) -> bool {
        self.rank == Rank::Ace
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.rank.symbol())
    }
}

impl FromStr for Card {
    type Err = Error;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        parse_card(token)
    }
}

/// Parses a rank token such as `"10"`, `" q "` or `"A"`.
pub fn parse_card(token: &str) -> Result<Card, Error> {
    let normalized = token.trim().to_ascii_uppercase();
    Rank::from_symbol(&normalized)
        .map(Card::new)
        .ok_or_else(|| Error::InvalidCardInput(token.to_string()))
}

/// Anything that can hand out cards to the simulator.
pub trait RandomSource {
    fn draw(&mut self) -> Card;
}

/// Infinite shoe: every draw is uniform over the 13 ranks, with replacement.
pub struct InfiniteDeck<R = SmallRng> {
    rng: R,
}

impl InfiniteDeck<SmallRng> {
    pub fn new(seed: u64) -> Self {
        InfiniteDeck {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        InfiniteDeck {
            rng: SmallRng::from_entropy(),
        }
    }

    /// Seeded when `seed` is present, entropy-backed otherwise.
    pub fn seeded_or_entropy(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => InfiniteDeck::new(seed),
            None => InfiniteDeck::from_entropy(),
        }
    }
}

impl<R: Rng> InfiniteDeck<R> {
    pub fn with_rng(rng: R) -> Self {
        InfiniteDeck { rng }
    }
}

impl<R: Rng> RandomSource for InfiniteDeck<R> {
    fn draw(&mut self) -> Card {
        Card::new(Rank::ALL[self.rng.gen_range(0..Rank::ALL.len())])
    }
}
