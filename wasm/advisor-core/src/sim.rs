use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    deck::{parse_card, Card, InfiniteDeck, RandomSource},
    error::Error,
    explain::explain,
    hand::{parse_hand, Hand},
    strategy::{recommend, Action},
};

pub const DEFAULT_TRIALS: u32 = 10_000;

const STAKE: f64 = 1.0;
const BLACKJACK_PAYOUT: f64 = 1.5;
const DEALER_STANDS_ON: u8 = 17;

/// Player bust, dealer play-out, expected value.
const PASSES: u32 = 3;

fn default_trials() -> u32 {
    DEFAULT_TRIALS
}

fn default_progress_interval() -> u32 {
    10_000
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyRequest {
    pub card1: String,
    pub card2: String,
    pub dealer_card: String,
    #[serde(default = "default_trials")]
    pub trials: u32,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_progress_interval")]
    pub progress_interval: u32,
}

impl StrategyRequest {
    pub fn new(card1: &str, card2: &str, dealer_card: &str) -> Self {
        StrategyRequest {
            card1: card1.to_string(),
            card2: card2.to_string(),
            dealer_card: dealer_card.to_string(),
            trials: default_trials(),
            seed: None,
            progress_interval: default_progress_interval(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Estimate {
    pub player_bust_probability: f64,
    pub dealer_bust_probability: f64,
    pub dealer_makes_hand_probability: f64,
    pub expected_value: f64,
}

/// Tally of dealer play-outs. Every trial lands in exactly one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DealerOutcomes {
    pub trials: u32,
    pub busts: u32,
    pub made_hands: u32,
}

impl DealerOutcomes {
    pub fn bust_probability(&self) -> f64 {
        if self.trials == 0 {
            return 0.0;
        }
        self.busts as f64 / self.trials as f64
    }

    pub fn makes_hand_probability(&self) -> f64 {
        1.0 - self.bust_probability()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyReport {
    pub player_cards: Hand,
    pub dealer_card: Card,
    pub recommended_move: Action,
    pub total: u8,
    pub is_soft: bool,
    #[serde(flatten)]
    pub estimate: Estimate,
    pub explanation: &'static str,
}

/// Recommendation without any simulation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveAdvice {
    pub recommended_move: Action,
    pub total: u8,
    pub is_soft: bool,
    pub explanation: &'static str,
}

struct Progress<'a> {
    completed: u32,
    total: u32,
    interval: u32,
    report: &'a mut dyn FnMut(u32, u32),
}

impl<'a> Progress<'a> {
    fn new(total: u32, interval: u32, report: &'a mut dyn FnMut(u32, u32)) -> Self {
        Progress {
            completed: 0,
            total,
            interval: interval.max(1),
            report,
        }
    }

    fn tick(&mut self) {
        self.completed = self.completed.saturating_add(1);
        if self.completed % self.interval == 0 || self.completed == self.total {
            (self.report)(self.completed, self.total);
        }
    }
}

pub fn advise_move(request: &StrategyRequest) -> Result<MoveAdvice, Error> {
    let player = parse_hand([&request.card1, &request.card2])?;
    let dealer_card = parse_card(&request.dealer_card)?;
    let recommended_move = recommend(&player, dealer_card);
    Ok(MoveAdvice {
        recommended_move,
        total: player.total(),
        is_soft: player.is_soft(),
        explanation: explain(recommended_move, &player),
    })
}

pub fn advise(request: &StrategyRequest) -> Result<StrategyReport, Error> {
    advise_with_progress(request, |_completed, _total| {})
}

pub fn advise_with_progress<F>(request: &StrategyRequest, progress_cb: F) -> Result<StrategyReport, Error>
where
    F: FnMut(u32, u32),
{
    let player = parse_hand([&request.card1, &request.card2])?;
    let dealer_card = parse_card(&request.dealer_card)?;
    let recommended_move = recommend(&player, dealer_card);

    let mut deck = InfiniteDeck::seeded_or_entropy(request.seed);
    let estimate = estimate_with_progress(
        &player,
        dealer_card,
        request.trials,
        &mut deck,
        request.progress_interval,
        progress_cb,
    );

    info!(
        player = %player,
        dealer = %dealer_card,
        action = %recommended_move,
        trials = request.trials,
        expected_value = estimate.expected_value,
        "computed strategy"
    );

    Ok(StrategyReport {
        total: player.total(),
        is_soft: player.is_soft(),
        explanation: explain(recommended_move, &player),
        player_cards: player,
        dealer_card,
        recommended_move,
        estimate,
    })
}

pub fn estimate<S>(hand: &Hand, dealer_up: Card, trials: u32, source: &mut S) -> Estimate
where
    S: RandomSource + ?Sized,
{
    estimate_with_progress(hand, dealer_up, trials, source, u32::MAX, |_completed, _total| {})
}

/// Runs every estimation pass back to back on `source`, reporting progress
/// every `progress_interval` trials across all passes.
pub fn estimate_with_progress<S, F>(
    hand: &Hand,
    dealer_up: Card,
    trials: u32,
    source: &mut S,
    progress_interval: u32,
    mut progress_cb: F,
) -> Estimate
where
    S: RandomSource + ?Sized,
    F: FnMut(u32, u32),
{
    let trials = trials.max(1);
    let mut progress = Progress::new(trials.saturating_mul(PASSES), progress_interval, &mut progress_cb);

    let player_busts = player_bust_pass(hand, trials, source, &mut progress);
    let dealer = dealer_pass(dealer_up, trials, source, &mut progress);
    let expected_value = expected_value_pass(hand, dealer_up, trials, source, &mut progress);

    Estimate {
        player_bust_probability: player_busts as f64 / trials as f64,
        dealer_bust_probability: dealer.bust_probability(),
        dealer_makes_hand_probability: dealer.makes_hand_probability(),
        expected_value,
    }
}

/// Share of trials in which one more card busts `hand`.
pub fn player_bust_probability<S>(hand: &Hand, trials: u32, source: &mut S) -> f64
where
    S: RandomSource + ?Sized,
{
    let trials = trials.max(1);
    let mut noop = |_: u32, _: u32| {};
    let mut progress = Progress::new(trials, u32::MAX, &mut noop);
    player_bust_pass(hand, trials, source, &mut progress) as f64 / trials as f64
}

pub fn dealer_outcomes<S>(dealer_up: Card, trials: u32, source: &mut S) -> DealerOutcomes
where
    S: RandomSource + ?Sized,
{
    let trials = trials.max(1);
    let mut noop = |_: u32, _: u32| {};
    let mut progress = Progress::new(trials, u32::MAX, &mut noop);
    dealer_pass(dealer_up, trials, source, &mut progress)
}

pub fn expected_value<S>(hand: &Hand, dealer_up: Card, trials: u32, source: &mut S) -> f64
where
    S: RandomSource + ?Sized,
{
    let trials = trials.max(1);
    let mut noop = |_: u32, _: u32| {};
    let mut progress = Progress::new(trials, u32::MAX, &mut noop);
    expected_value_pass(hand, dealer_up, trials, source, &mut progress)
}

fn player_bust_pass<S>(hand: &Hand, trials: u32, source: &mut S, progress: &mut Progress<'_>) -> u32
where
    S: RandomSource + ?Sized,
{
    let mut busts = 0;
    for _ in 0..trials {
        if hand.clone().with_card(source.draw()).is_busted() {
            busts += 1;
        }
        progress.tick();
    }
    debug!(hand = %hand, trials, busts, "player bust pass complete");
    busts
}

fn dealer_pass<S>(dealer_up: Card, trials: u32, source: &mut S, progress: &mut Progress<'_>) -> DealerOutcomes
where
    S: RandomSource + ?Sized,
{
    let mut busts = 0;
    for _ in 0..trials {
        let dealer = play_dealer(Hand::from_cards([dealer_up, source.draw()]), source);
        if dealer.is_busted() {
            busts += 1;
        }
        progress.tick();
    }
    let outcomes = DealerOutcomes {
        trials,
        busts,
        made_hands: trials - busts,
    };
    debug!(
        dealer = %dealer_up,
        trials,
        busts = outcomes.busts,
        made_hands = outcomes.made_hands,
        "dealer pass complete"
    );
    outcomes
}

fn expected_value_pass<S>(
    hand: &Hand,
    dealer_up: Card,
    trials: u32,
    source: &mut S,
    progress: &mut Progress<'_>,
) -> f64
where
    S: RandomSource + ?Sized,
{
    let mut total_winnings = 0.0;
    for _ in 0..trials {
        total_winnings += play_round(hand, dealer_up, source);
        progress.tick();
    }
    let expected_value = total_winnings / trials as f64;
    debug!(hand = %hand, dealer = %dealer_up, trials, expected_value, "expected value pass complete");
    expected_value
}

/// Draws until the dealer reaches 17, hitting soft 17.
pub fn play_dealer<S>(mut dealer: Hand, source: &mut S) -> Hand
where
    S: RandomSource + ?Sized,
{
    while dealer_must_hit(&dealer) {
        dealer = dealer.with_card(source.draw());
    }
    dealer
}

fn dealer_must_hit(dealer: &Hand) -> bool {
    let total = dealer.total();
    total < DEALER_STANDS_ON || (total == DEALER_STANDS_ON && dealer.is_soft())
}

/// Plays one full round of `hand` at unit stake and returns the net payoff.
///
/// Split hands are never resplit and never doubled; each faces its own dealer
/// play-out from the same up-card.
pub fn play_round<S>(hand: &Hand, dealer_up: Card, source: &mut S) -> f64
where
    S: RandomSource + ?Sized,
{
    let dealer = Hand::from_cards([dealer_up, source.draw()]);

    if hand.is_blackjack() {
        return if dealer.is_blackjack() {
            0.0
        } else {
            BLACKJACK_PAYOUT * STAKE
        };
    }

    let action = recommend(hand, dealer_up);

    if hand.can_split() && action == Action::Split {
        let split_hands: Vec<Hand> = hand
            .cards()
            .iter()
            .map(|&card| Hand::from_cards([card, source.draw()]))
            .collect();
        return split_hands
            .into_iter()
            .map(|split| play_split_hand(split, dealer_up, source))
            .sum();
    }

    if action == Action::Double {
        let player = hand.clone().with_card(source.draw());
        return settle(&player, dealer, 2.0 * STAKE, source);
    }

    let player = hit_while_recommended(hand.clone(), dealer_up, source);
    settle(&player, dealer, STAKE, source)
}

fn play_split_hand<S>(player: Hand, dealer_up: Card, source: &mut S) -> f64
where
    S: RandomSource + ?Sized,
{
    let dealer = Hand::from_cards([dealer_up, source.draw()]);
    let player = hit_while_recommended(player, dealer_up, source);
    settle(&player, dealer, STAKE, source)
}

fn hit_while_recommended<S>(mut player: Hand, dealer_up: Card, source: &mut S) -> Hand
where
    S: RandomSource + ?Sized,
{
    while player.total() < 21 && recommend(&player, dealer_up) == Action::Hit {
        player = player.with_card(source.draw());
    }
    player
}

/// Pays out a finished player hand. The dealer only draws when the player
/// has not busted.
fn settle<S>(player: &Hand, dealer: Hand, stake: f64, source: &mut S) -> f64
where
    S: RandomSource + ?Sized,
{
    if player.is_busted() {
        return -stake;
    }

    let dealer = play_dealer(dealer, source);
    let player_value = player.total();
    let dealer_value = dealer.total();

    if dealer.is_busted() || player_value > dealer_value {
        stake
    } else if player_value < dealer_value {
        -stake
    } else {
        0.0
    }
}
