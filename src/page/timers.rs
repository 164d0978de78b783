//! RAII handles for `setInterval` / `setTimeout`.
//!
//! Dropping a handle clears the browser timer and frees its closure, so a stage
//! that owns its timers cannot leave them running after it is torn down.

use std::cell::Cell;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Window;

use crate::error::GreetingError;

thread_local! {
    static LIVE_INTERVALS: Cell<usize> = const { Cell::new(0) };
}

/// Intervals started and not yet cancelled.
pub(crate) fn live_intervals() -> usize {
    LIVE_INTERVALS.with(Cell::get)
}

pub(crate) struct Interval {
    window: Window,
    handle: i32,
    label: &'static str,
    _callback: Closure<dyn FnMut()>,
}

impl Interval {
    pub(crate) fn start(
        window: &Window,
        label: &'static str,
        period_ms: i32,
        f: impl FnMut() + 'static,
    ) -> Result<Self, GreetingError> {
        let callback = Closure::wrap(Box::new(f) as Box<dyn FnMut()>);
        let handle = window.set_interval_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            period_ms,
        )?;
        LIVE_INTERVALS.with(|n| n.set(n.get() + 1));
        log::debug!("{label} interval started every {period_ms}ms");
        Ok(Self {
            window: window.clone(),
            handle,
            label,
            _callback: callback,
        })
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        self.window.clear_interval_with_handle(self.handle);
        let live = LIVE_INTERVALS.with(|n| {
            n.set(n.get().saturating_sub(1));
            n.get()
        });
        log::debug!("{} interval cancelled, {live} still running", self.label);
    }
}

/// One-shot timer. Must not be dropped from inside its own callback.
pub(crate) struct Timeout {
    window: Window,
    handle: i32,
    _callback: Closure<dyn FnMut()>,
}

impl Timeout {
    pub(crate) fn start(
        window: &Window,
        delay_ms: i32,
        f: impl FnOnce() + 'static,
    ) -> Result<Self, GreetingError> {
        let mut once = Some(f);
        let callback = Closure::wrap(Box::new(move || {
            if let Some(f) = once.take() {
                f();
            }
        }) as Box<dyn FnMut()>);
        let handle = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            delay_ms,
        )?;
        Ok(Self {
            window: window.clone(),
            handle,
            _callback: callback,
        })
    }
}

impl Drop for Timeout {
    fn drop(&mut self) {
        // Clearing an already-fired timeout is a no-op in the browser.
        self.window.clear_timeout_with_handle(self.handle);
    }
}
