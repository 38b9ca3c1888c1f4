use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::ai::EngineConfig;
use crate::error::OthelloError;
use crate::game::GameSession;

/// Browser-facing wrapper around [`GameSession`].
#[wasm_bindgen]
pub struct OthelloGame {
    session: GameSession,
}

#[wasm_bindgen]
impl OthelloGame {
    /// `config` is an optional `EngineConfig`-shaped object; missing fields take defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<OthelloGame, JsValue> {
        let config: EngineConfig = if config.is_undefined() || config.is_null() {
            EngineConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        let session = GameSession::new(&config).map_err(to_js_error)?;
        Ok(OthelloGame { session })
    }

    pub fn state(&self) -> Result<JsValue, JsValue> {
        to_js(&self.session.state())
    }

    #[wasm_bindgen(js_name = legalMoves)]
    pub fn legal_moves(&self) -> Result<JsValue, JsValue> {
        to_js(&self.session.legal_moves())
    }

    #[wasm_bindgen(js_name = mustPass)]
    pub fn must_pass(&self) -> bool {
        self.session.must_pass()
    }

    #[wasm_bindgen(js_name = isAiTurn)]
    pub fn is_ai_turn(&self) -> bool {
        self.session.is_ai_turn()
    }

    pub fn place(&mut self, row: u8, col: u8) -> Result<JsValue, JsValue> {
        self.session.place(row, col).map_err(to_js_error)?;
        self.state()
    }

    pub fn pass(&mut self) -> Result<JsValue, JsValue> {
        self.session.pass().map_err(to_js_error)?;
        self.state()
    }

    #[wasm_bindgen(js_name = aiMove)]
    pub fn ai_move(&mut self) -> Result<JsValue, JsValue> {
        self.session.ai_move().map_err(to_js_error)?;
        self.state()
    }

    pub fn hints(&self) -> Result<JsValue, JsValue> {
        let hints = self.session.hints().map_err(to_js_error)?;
        to_js(&hints)
    }

    /// `undefined` until the game is over.
    pub fn result(&self) -> Result<JsValue, JsValue> {
        match self.session.result() {
            Some(result) => to_js(&result),
            None => Ok(JsValue::UNDEFINED),
        }
    }

    pub fn restart(&mut self) -> Result<JsValue, JsValue> {
        self.session.restart();
        self.state()
    }
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    Ok(serde_wasm_bindgen::to_value(value)?)
}

fn to_js_error(err: OthelloError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
