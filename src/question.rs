//! The question card's two buttons: an evasive "No" and an ever-growing "Yes".

use rand::Rng;

use crate::DECLINE_MESSAGES;

/// Declines before the "No" button starts running away.
pub const ESCAPE_THRESHOLD: u32 = 2;
/// Full width / height (px) of the rectangle the button jumps within, centred
/// on its resting place.
pub const ESCAPE_SPAN_X: f64 = 200.0;
pub const ESCAPE_SPAN_Y: f64 = 150.0;

const SCALE_STEP: f64 = 0.3;
const SCALE_MAX: f64 = 3.0;

#[derive(Clone, Debug, Default)]
pub struct EvasiveButton {
    decline_count: u32,
    offset: (f64, f64),
}

impl EvasiveButton {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn decline_count(&self) -> u32 {
        self.decline_count
    }

    /// Current translate offset in px.
    pub fn offset(&self) -> (f64, f64) {
        self.offset
    }

    /// Click on "No". The escape check sees the count from before this click,
    /// so the first two declines leave the button in place.
    pub fn decline<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.escape(rng);
        self.decline_count = self.decline_count.saturating_add(1);
        log::debug!("declined {} time(s)", self.decline_count);
    }

    /// Pointer-enter / touch-start on "No": run away, without counting.
    pub fn dodge<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.escape(rng);
    }

    fn escape<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.decline_count < ESCAPE_THRESHOLD {
            return;
        }
        let x = (rng.r#gen::<f64>() - 0.5) * ESCAPE_SPAN_X;
        let y = (rng.r#gen::<f64>() - 0.5) * ESCAPE_SPAN_Y;
        self.offset = (x, y);
    }

    pub fn label(&self) -> &'static str {
        let idx = (self.decline_count as usize).min(DECLINE_MESSAGES.len() - 1);
        DECLINE_MESSAGES[idx]
    }

    pub fn accept_scale(&self) -> f64 {
        (1.0 + SCALE_STEP * self.decline_count as f64).min(SCALE_MAX)
    }

    /// Whether moves should be eased; before the threshold the button never moves.
    pub fn animates(&self) -> bool {
        self.decline_count >= ESCAPE_THRESHOLD
    }

    pub fn hint(&self) -> Option<&'static str> {
        match self.decline_count {
            0 => None,
            1 => Some("Come on, give me a chance!"),
            2 | 3 => Some("The No button is getting nervous..."),
            _ => Some("Haha, you can't catch that button!"),
        }
    }
}
