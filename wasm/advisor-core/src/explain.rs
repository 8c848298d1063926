use crate::{hand::Hand, strategy::Action};

/// Canned explanation for a recommendation. Rules are checked in order and the
/// first match wins.
pub fn explain(action: Action, hand: &Hand) -> &'static str {
    let total = hand.total();
    let soft = hand.is_soft();

    match action {
        Action::Hit if soft => {
            "You hold a soft hand with an ace counted as 11. Take another card: \
             the ace can drop to 1, so one more card cannot bust you."
        }
        Action::Double if soft => {
            "You hold a soft hand with an ace counted as 11. Double down to use \
             that flexibility for one strong card while the dealer is likely to \
             bust or finish weak."
        }
        Action::Stand if soft && (total == 19 || total == 20) => {
            "You hold a strong soft total with an ace counted as 11. Keep it; \
             another card is unlikely to improve it and the dealer often \
             busts or finishes lower."
        }
        Action::Hit if total <= 10 => {
            "Take another card. No single card can bust a total this low."
        }
        Action::Hit if total == 12 || total == 13 => {
            "Take another card. Your bust risk is still modest and the dealer \
             makes a hand more than 60% of the time, although hitting here \
             still carries a negative expected value."
        }
        Action::Hit if total >= 13 => {
            "Take another card. Your bust risk is high, but the dealer is very \
             likely to make a hand that beats you if you stand."
        }
        Action::Stand if total == 21 && hand.is_blackjack() => {
            "Blackjack! Stand. You win unless the dealer also has blackjack, \
             which is a push."
        }
        Action::Stand if total == 21 => "You have 21. Stand.",
        Action::Stand if total == 20 && !soft => {
            "Stand on 20. It is a very strong hand and the dealer often busts \
             or finishes lower. Splitting tens would lower your expected value."
        }
        Action::Stand => {
            "Stand. Another card risks a bust, and standing carries a higher \
             expected value than hitting even if the dealer makes a hand."
        }
        Action::Double if total == 11 => {
            "Always double down on 11. One more card is likely to make a strong \
             hand while the dealer is likely to bust or finish weak."
        }
        Action::Double if total == 10 => {
            "Double down on 10 unless the dealer shows a ten or an ace. One more \
             card gives you a good chance at a strong hand."
        }
        Action::Double if total == 9 => {
            "Double down on 9 against a dealer 3 through 6. One more card can \
             reach 19 or 20 and the dealer is showing a weak card."
        }
        Action::Double => "Double your bet and take exactly one more card.",
        Action::Split if is_pair_of_aces(hand) => {
            "Always split aces. Each ace starts a new hand at 11 and a ten-value \
             card on either one makes 21."
        }
        Action::Split if total == 16 => {
            "Always split eights. Sixteen is the worst total in blackjack and \
             splitting gives both eights a fresh start."
        }
        Action::Split => {
            "Split the pair. Two separate hands give you two chances to improve \
             while the dealer may bust or finish weak."
        }
        Action::Hit => "No specific recommendation available.",
    }
}

fn is_pair_of_aces(hand: &Hand) -> bool {
    hand.can_split() && hand.cards().iter().all(|card| card.is_ace())
}
