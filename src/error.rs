//! Error types for configuration and the browser glue.
//!
//! Game operations themselves never fail; a click on the wrong letter is a
//! no-op, not an error. Only mounting the page can go wrong.

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("recipient name is empty")]
    EmptyRecipient,
    #[error("target word is empty")]
    EmptyTargetWord,
    #[error("target word contains '{0}', only A-Z can be spawned")]
    UnsupportedGlyph(char),
}

#[derive(Debug, Error)]
pub enum GreetingError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("dom unavailable: {0}")]
    Dom(&'static str),
    #[error("javascript error: {0}")]
    Js(String),
    #[cfg(feature = "serde_json")]
    #[error("malformed configuration json: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<JsValue> for GreetingError {
    fn from(value: JsValue) -> Self {
        GreetingError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<GreetingError> for JsValue {
    fn from(err: GreetingError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
