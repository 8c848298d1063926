use std::fmt;

use serde::Serialize;

use crate::{deck::Card, hand::Hand};

/// Dealer up-card value for an ace before clamping.
const ACE: u8 = 11;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub enum Action {
    Hit,
    Stand,
    Double,
    Split,
}

impl Action {
    pub fn label(&self) -> &'static str {
        match self {
            Action::Hit => "hit",
            Action::Stand => "stand",
            Action::Double => "double down",
            Action::Split => "split",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Basic-strategy decision for `hand` against the dealer's up-card.
///
/// Pairs are checked first, then hard totals, then soft totals. The dealer
/// value is clamped to 10 before any rule runs, so the explicit ace arms in the
/// pair-18 and soft-18 rules never fire on their own; an ace up-card is played
/// exactly like a ten.
pub fn recommend(hand: &Hand, dealer_up: Card) -> Action {
    let dealer = dealer_value(dealer_up);

    if let Some(total) = pair_total(hand) {
        return pair_action(total, dealer);
    }

    let total = hand.total();
    if hand.is_soft() {
        soft_action(total, dealer)
    } else {
        hard_action(total, dealer)
    }
}

fn dealer_value(card: Card) -> u8 {
    card.value().min(10)
}

/// Twice the card value for a two-card pair of equal rank. Aces map to 22.
fn pair_total(hand: &Hand) -> Option<u8> {
    if !hand.can_split() {
        return None;
    }
    hand.cards().first().map(|card| card.value() * 2)
}

fn pair_action(pair_total: u8, dealer: u8) -> Action {
    match pair_total {
        22 => Action::Split,
        20 => Action::Stand,
        18 => match dealer {
            7 | 10 | ACE => Action::Stand,
            _ => Action::Split,
        },
        16 => Action::Split,
        14 => split_or_hit((2..=7).contains(&dealer)),
        12 => split_or_hit((2..=6).contains(&dealer)),
        10 => double_or_hit((2..=9).contains(&dealer)),
        8 => Action::Hit,
        6 | 4 => split_or_hit((4..=6).contains(&dealer)),
        _ => Action::Split,
    }
}

fn hard_action(total: u8, dealer: u8) -> Action {
    match total {
        0..=8 => Action::Hit,
        9 => double_or_hit((3..=6).contains(&dealer)),
        10 => double_or_hit(dealer <= 9),
        11 => Action::Double,
        12 => stand_or_hit((4..=6).contains(&dealer)),
        13..=16 => stand_or_hit((2..=6).contains(&dealer)),
        _ => Action::Stand,
    }
}

fn soft_action(total: u8, dealer: u8) -> Action {
    match total {
        0..=17 => double_or_hit((4..=6).contains(&dealer)),
        18 => match dealer {
            9 | 10 | ACE => Action::Hit,
            3..=6 => Action::Double,
            _ => Action::Stand,
        },
        _ => Action::Stand,
    }
}

fn split_or_hit(split: bool) -> Action {
    if split {
        Action::Split
    } else {
        Action::Hit
    }
}

fn double_or_hit(double: bool) -> Action {
    if double {
        Action::Double
    } else {
        Action::Hit
    }
}

fn stand_or_hit(stand: bool) -> Action {
    if stand {
        Action::Stand
    } else {
        Action::Hit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{deck::parse_card, hand::parse_hand};

    fn decide(player: &[&str], dealer: &str) -> Action {
        recommend(&parse_hand(player).unwrap(), parse_card(dealer).unwrap())
    }

    const DEALERS: [&str; 10] = ["2", "3", "4", "5", "6", "7", "8", "9", "10", "A"];

    #[test]
    fn test_blackjack_stands() {
        assert_eq!(decide(&["A", "K"], "5"), Action::Stand);
        assert_eq!(decide(&["K", "A"], "A"), Action::Stand);
    }

    #[test]
    fn test_eights_always_split() {
        for dealer in DEALERS {
            assert_eq!(decide(&["8", "8"], dealer), Action::Split, "dealer {dealer}");
        }
    }

    #[test]
    fn test_aces_always_split() {
        for dealer in DEALERS {
            assert_eq!(decide(&["A", "A"], dealer), Action::Split, "dealer {dealer}");
        }
    }

    #[test]
    fn test_ten_pairs_stand_but_mixed_tens_are_hard_20() {
        assert_eq!(decide(&["K", "K"], "6"), Action::Stand);
        assert_eq!(decide(&["10", "10"], "A"), Action::Stand);
        assert_eq!(decide(&["K", "Q"], "6"), Action::Stand);
    }

    #[test]
    fn test_nines_stand_against_seven_ten_and_ace() {
        assert_eq!(decide(&["9", "9"], "7"), Action::Stand);
        assert_eq!(decide(&["9", "9"], "10"), Action::Stand);
        assert_eq!(decide(&["9", "9"], "K"), Action::Stand);
        assert_eq!(decide(&["9", "9"], "A"), Action::Stand);
        assert_eq!(decide(&["9", "9"], "8"), Action::Split);
        assert_eq!(decide(&["9", "9"], "2"), Action::Split);
    }

    #[test]
    fn test_sevens_and_sixes() {
        assert_eq!(decide(&["7", "7"], "7"), Action::Split);
        assert_eq!(decide(&["7", "7"], "8"), Action::Hit);
        assert_eq!(decide(&["6", "6"], "6"), Action::Split);
        assert_eq!(decide(&["6", "6"], "7"), Action::Hit);
        assert_eq!(decide(&["6", "6"], "2"), Action::Split);
    }

    #[test]
    fn test_fives_double_like_hard_ten() {
        assert_eq!(decide(&["5", "5"], "9"), Action::Double);
        assert_eq!(decide(&["5", "5"], "10"), Action::Hit);
        assert_eq!(decide(&["5", "5"], "A"), Action::Hit);
    }

    #[test]
    fn test_small_pairs() {
        assert_eq!(decide(&["4", "4"], "5"), Action::Hit);
        assert_eq!(decide(&["3", "3"], "4"), Action::Split);
        assert_eq!(decide(&["3", "3"], "3"), Action::Hit);
        assert_eq!(decide(&["2", "2"], "5"), Action::Split);
        assert_eq!(decide(&["2", "2"], "7"), Action::Hit);
    }

    #[test]
    fn test_hard_totals() {
        assert_eq!(hard_action(5, 6), Action::Hit);
        assert_eq!(hard_action(8, 6), Action::Hit);
        assert_eq!(hard_action(9, 2), Action::Hit);
        assert_eq!(hard_action(9, 3), Action::Double);
        assert_eq!(hard_action(9, 7), Action::Hit);
        assert_eq!(hard_action(10, 9), Action::Double);
        assert_eq!(hard_action(10, 10), Action::Hit);
        assert_eq!(hard_action(11, 10), Action::Double);
        assert_eq!(hard_action(12, 3), Action::Hit);
        assert_eq!(hard_action(12, 4), Action::Stand);
        assert_eq!(hard_action(12, 7), Action::Hit);
        assert_eq!(hard_action(13, 2), Action::Stand);
        assert_eq!(hard_action(16, 6), Action::Stand);
        assert_eq!(hard_action(16, 7), Action::Hit);
        assert_eq!(hard_action(17, 10), Action::Stand);
        assert_eq!(hard_action(21, 10), Action::Stand);
    }

    #[test]
    fn test_soft_totals() {
        assert_eq!(soft_action(13, 4), Action::Double);
        assert_eq!(soft_action(17, 6), Action::Double);
        assert_eq!(soft_action(17, 3), Action::Hit);
        assert_eq!(soft_action(17, 7), Action::Hit);
        assert_eq!(soft_action(18, 2), Action::Stand);
        assert_eq!(soft_action(18, 3), Action::Double);
        assert_eq!(soft_action(18, 6), Action::Double);
        assert_eq!(soft_action(18, 7), Action::Stand);
        assert_eq!(soft_action(18, 8), Action::Stand);
        assert_eq!(soft_action(18, 9), Action::Hit);
        assert_eq!(soft_action(18, 10), Action::Hit);
        assert_eq!(soft_action(19, 6), Action::Stand);
        assert_eq!(soft_action(21, 10), Action::Stand);
    }

    #[test]
    fn test_ace_up_card_plays_as_ten() {
        for (player, expected) in [
            (&["10", "8"][..], Action::Stand),
            (&["6", "4"][..], Action::Hit),
            (&["5", "4"][..], Action::Hit),
            (&["A", "7"][..], Action::Hit),
            (&["10", "6"][..], Action::Hit),
        ] {
            assert_eq!(decide(player, "A"), expected, "player {player:?}");
            assert_eq!(decide(player, "10"), expected, "player {player:?}");
        }
    }

    #[test]
    fn test_multi_card_hands_use_totals() {
        assert_eq!(decide(&["2", "3", "4"], "6"), Action::Double);
        assert_eq!(decide(&["A", "2", "3"], "5"), Action::Double);
        assert_eq!(decide(&["A", "6", "9"], "10"), Action::Hit);
        assert_eq!(decide(&["4", "4", "4"], "2"), Action::Hit);
    }

    #[test]
    fn test_action_labels() {
        assert_eq!(Action::Double.label(), "double down");
        assert_eq!(Action::Hit.to_string(), "hit");
    }
}
