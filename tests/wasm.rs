#![cfg(target_arch = "wasm32")]

use js_sys::Reflect;
use othello::wasm::OthelloGame;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::wasm_bindgen_test;

fn field(value: &JsValue, name: &str) -> JsValue {
    Reflect::get(value, &JsValue::from_str(name)).unwrap()
}

#[wasm_bindgen_test]
fn wasm_ready_reports_true() {
    assert!(othello::wasm_ready());
}

#[wasm_bindgen_test]
fn new_game_exposes_opening_state() {
    let game = OthelloGame::new(JsValue::UNDEFINED).unwrap();
    let state = game.state().unwrap();

    assert_eq!(field(&state, "black_count").as_f64(), Some(2.0));
    assert_eq!(field(&state, "next_to_move").as_string().as_deref(), Some("black"));
    assert!(game.result().unwrap().is_undefined());
}

#[wasm_bindgen_test]
fn illegal_place_returns_an_error_string() {
    let mut game = OthelloGame::new(JsValue::NULL).unwrap();
    let err = game.place(0, 0).unwrap_err();

    assert!(err.as_string().unwrap().contains("invalid move"));
}

#[wasm_bindgen_test]
fn human_then_ai_move_round_trip() {
    let mut game = OthelloGame::new(JsValue::UNDEFINED).unwrap();
    game.place(2, 3).unwrap();
    assert!(game.is_ai_turn());

    let state = game.ai_move().unwrap();
    assert_eq!(field(&state, "next_to_move").as_string().as_deref(), Some("black"));
}
