use js_sys::Function;
use wasm_bindgen::prelude::*;

mod deck;
mod error;
mod explain;
mod hand;
mod sim;
mod strategy;

pub use deck::{parse_card, Card, InfiniteDeck, RandomSource, Rank};
pub use error::Error;
pub use explain::explain;
pub use hand::{hand_value, parse_hand, Hand};
pub use sim::{
    advise, advise_move, advise_with_progress, dealer_outcomes, estimate, estimate_with_progress,
    expected_value, play_dealer, play_round, player_bust_probability, DealerOutcomes, Estimate,
    MoveAdvice, StrategyReport, StrategyRequest, DEFAULT_TRIALS,
};
pub use strategy::{recommend, Action};

#[wasm_bindgen]
pub fn recommend_move(params: &JsValue) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();
    let input: StrategyRequest = serde_wasm_bindgen::from_value(params.clone())
        .map_err(|err| JsValue::from_str(&format!("Invalid input: {err}")))?;

    let result = sim::advise_move(&input)
        .map_err(|err| JsValue::from_str(&format!("Recommendation failed: {err}")))?;

    serde_wasm_bindgen::to_value(&result)
        .map_err(|err| JsValue::from_str(&format!("Serialization failed: {err}")))
}

#[wasm_bindgen]
pub fn analyze_hand(params: &JsValue) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();
    let input: StrategyRequest = serde_wasm_bindgen::from_value(params.clone())
        .map_err(|err| JsValue::from_str(&format!("Invalid input: {err}")))?;

    let result = sim::advise(&input)
        .map_err(|err| JsValue::from_str(&format!("Analysis failed: {err}")))?;

    serde_wasm_bindgen::to_value(&result)
        .map_err(|err| JsValue::from_str(&format!("Serialization failed: {err}")))
}

#[wasm_bindgen]
pub fn analyze_hand_with_progress(
    params: &JsValue,
    progress_callback: &Function,
) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();
    let input: StrategyRequest = serde_wasm_bindgen::from_value(params.clone())
        .map_err(|err| JsValue::from_str(&format!("Invalid input: {err}")))?;

    let progress_cb = |current: u32, total: u32| {
        let _ = progress_callback.call2(
            &JsValue::NULL,
            &JsValue::from(current),
            &JsValue::from(total),
        );
    };

    let result = sim::advise_with_progress(&input, progress_cb)
        .map_err(|err| JsValue::from_str(&format!("Analysis failed: {err}")))?;

    serde_wasm_bindgen::to_value(&result)
        .map_err(|err| JsValue::from_str(&format!("Serialization failed: {err}")))
}
