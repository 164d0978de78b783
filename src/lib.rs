//! Love Letters core crate.
//!
//! A four-stage browser greeting: a welcome card, a letter-collecting mini-game,
//! a question with an evasive "No" button, and a celebration. The game logic
//! (`letters`, `question`, `stage`, `session`, `hearts`) is plain Rust and runs
//! natively under `cargo test`; the `page` module wires it to the DOM and is the
//! only place that touches browser APIs.

use wasm_bindgen::prelude::*;

pub mod config;
pub mod error;
pub mod hearts;
pub mod letters;
mod page;
pub mod question;
pub mod session;
pub mod stage;

pub use config::GreetingConfig;
pub use error::{ConfigError, GreetingError};
pub use session::Greeting;
pub use stage::{Stage, Trigger};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    // A second init (e.g. hot reload) reports an error we do not care about.
    let _ = console_log::init_with_level(log::Level::Info);
}

// -----------------------------------------------------------------------------
// Shared word & message tables
// -----------------------------------------------------------------------------

/// Word the player spells in the letters stage unless configured otherwise.
pub const TARGET_WORD: &str = "LOVE";

/// Person the greeting is addressed to unless configured otherwise.
pub const DEFAULT_RECIPIENT: &str = "Ninni";

/// Pool for non-biased spawns.
pub const ALPHABET: &[char] = &[
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R',
    'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];

/// Labels shown on the decline button, indexed by decline count (saturating).
pub const DECLINE_MESSAGES: &[&str] = &[
    "No",
    "Are you sure?",
    "Really sure?",
    "Think again!",
    "Last chance!",
    "Surely not?",
    "Please?",
    "Pretty please?",
];

// -----------------------------------------------------------------------------
// Unified entrypoints
// -----------------------------------------------------------------------------

#[wasm_bindgen]
pub fn start_greeting() -> Result<(), JsValue> {
    page::mount(GreetingConfig::default()).map_err(JsValue::from)
}

#[wasm_bindgen]
pub fn start_greeting_for(recipient: &str) -> Result<(), JsValue> {
    let config = GreetingConfig {
        recipient: recipient.to_string(),
        ..GreetingConfig::default()
    };
    page::mount(config).map_err(JsValue::from)
}

/// Mount with a JSON config, e.g. `{"recipient":"Sam","target_word":"HUGS"}`.
/// Missing fields fall back to their defaults.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_greeting_with_config(json: &str) -> Result<(), JsValue> {
    let config = GreetingConfig::from_json(json).map_err(JsValue::from)?;
    page::mount(config).map_err(JsValue::from)
}

/// Tear the page down, cancelling every interval and timeout it owns.
#[wasm_bindgen]
pub fn shutdown_greeting() {
    page::unmount();
}

/// Name of the active stage, or an empty string when nothing is mounted.
#[wasm_bindgen]
pub fn current_stage() -> String {
    page::current_stage()
        .map(|s| s.as_str().to_string())
        .unwrap_or_default()
}
