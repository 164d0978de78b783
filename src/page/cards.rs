//! Card markup for each stage. Dynamic text (the recipient's name, labels) is
//! filled in with `set_text_content` after the card is inserted, never spliced
//! into the HTML.

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlCanvasElement, HtmlElement};

use crate::error::GreetingError;

pub(crate) const CARD_STYLE: &str = "width:100%; max-width:30rem; margin:0 1rem; padding:2.5rem 2rem; \
    background:rgba(255,255,255,0.95); border:2px solid rgba(225,29,72,0.2); border-radius:1rem; \
    box-shadow:0 25px 50px -12px rgba(0,0,0,0.25); text-align:center; position:relative; z-index:10;";

const BUTTON_STYLE: &str = "background:#e11d48; color:#fff; font-weight:700; border:none; \
    border-radius:0.5rem; padding:0.6rem 2rem; font-size:1rem; cursor:pointer; \
    box-shadow:0 10px 15px -3px rgba(0,0,0,0.1);";

pub(crate) fn welcome_html() -> String {
    format!(
        "<div style='font-size:80px; color:#e11d48; line-height:1;'>♥</div>\
         <p style='color:#9f7a86; font-size:1.1rem; margin:1.5rem 0 0.25rem;'>A special message for</p>\
         <h1 id='ll-name' style='font-size:3rem; font-weight:700; margin:0;'></h1>\
         <p style='color:#9f7a86; margin:2rem 0;'>I have something important to ask you...</p>\
         <button id='ll-open' style='{BUTTON_STYLE}'>Open Message</button>"
    )
}

pub(crate) fn letters_html(width: u32, height: u32) -> String {
    format!(
        "<p style='font-size:0.875rem; color:#9f7a86; margin:0;'>Click letters to spell</p>\
         <h2 id='ll-progress' style='font-size:1.9rem; font-weight:700; letter-spacing:0.1em; margin:0.5rem 0 1rem;'></h2>\
         <canvas id='ll-field' width='{width}' height='{height}' \
             style='width:100%; border-radius:0.75rem; cursor:pointer; display:block;'></canvas>\
         <p style='font-size:0.875rem; color:#9f7a86; margin:1rem 0 0;' id='ll-prompt'></p>"
    )
}

pub(crate) fn question_html() -> String {
    format!(
        "<span style='display:inline-block; padding:0.25rem 0.75rem; background:rgba(225,29,72,0.1); \
             border-radius:999px; font-size:0.875rem; color:#e11d48;'>The Big Question</span>\
         <div style='font-size:96px; color:#e11d48; line-height:1; margin:1rem 0;'>♥</div>\
         <p style='color:#9f7a86; font-size:1.1rem; margin:0;'>Hey</p>\
         <h1 id='ll-name' style='font-size:2.25rem; font-weight:700; margin:0.25rem 0 1rem;'></h1>\
         <h2 style='font-size:1.6rem; font-weight:600; margin:1rem 0;'>Will you be my Valentine?</h2>\
         <div style='display:flex; align-items:center; justify-content:center; gap:1rem; \
             min-height:140px; position:relative;'>\
             <button id='ll-yes' style='{BUTTON_STYLE} transition:all 0.3s; transform-origin:center; z-index:10;'>Yes!</button>\
             <button id='ll-no' style='position:absolute; right:20%; background:transparent; \
                 border:2px solid rgba(159,122,134,0.3); color:#9f7a86; border-radius:0.5rem; \
                 padding:0.5rem 1rem; font-weight:500; cursor:pointer;'></button>\
         </div>\
         <p id='ll-hint' style='font-size:0.875rem; color:#9f7a86; display:none;'></p>"
    )
}

pub(crate) fn celebration_html() -> String {
    "<div style='font-size:128px; color:#e11d48; line-height:1;'>♥</div>\
     <h1 style='font-size:3rem; font-weight:700; margin:1.5rem 0 0.5rem;'>Yay!</h1>\
     <p style='font-size:1.4rem; color:#9f7a86; margin:0;'>I knew you'd say yes!</p>\
     <p id='ll-love' style='font-size:1.9rem; font-weight:600; margin:2rem 0 0.5rem;'></p>\
     <p style='font-size:1.1rem; color:#9f7a86; margin:0;'>You just made me the happiest person ever</p>\
     <div style='color:#e11d48; font-size:24px; letter-spacing:0.5rem; margin-top:1.5rem;'>♥♥♥♥♥</div>"
        .to_string()
}

pub(crate) fn element(doc: &Document, id: &str) -> Result<HtmlElement, GreetingError> {
    doc.get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        .ok_or(GreetingError::Dom("card element missing"))
}

pub(crate) fn canvas(doc: &Document, id: &str) -> Result<HtmlCanvasElement, GreetingError> {
    doc.get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        .ok_or(GreetingError::Dom("canvas element missing"))
}
