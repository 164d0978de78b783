//! Background hearts drifting up behind every stage.

/// One decorative heart. Times are in seconds, `left` in percent of the
/// viewport width, `size` in px.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloatingHeart {
    pub left: f64,
    pub delay: f64,
    pub duration: f64,
    pub size: f64,
}

pub const HEART_OPACITY: f64 = 0.4;
/// Vertical travel, in percent of the viewport height from the top edge.
const START_Y: f64 = 100.0;
const END_Y: f64 = -10.0;

const fn heart(left: f64, delay: f64, duration: f64, size: f64) -> FloatingHeart {
    FloatingHeart {
        left,
        delay,
        duration,
        size,
    }
}

pub const HEARTS: [FloatingHeart; 7] = [
    heart(5.0, 0.0, 12.0, 20.0),
    heart(20.0, 2.0, 14.0, 28.0),
    heart(35.0, 1.0, 10.0, 22.0),
    heart(50.0, 3.0, 16.0, 32.0),
    heart(65.0, 0.5, 11.0, 18.0),
    heart(80.0, 4.0, 13.0, 26.0),
    heart(95.0, 1.5, 15.0, 24.0),
];

impl FloatingHeart {
    /// Looping phase in `[0, 1)`, or `None` while still waiting on the delay.
    pub fn progress(&self, t_secs: f64) -> Option<f64> {
        let local = t_secs - self.delay;
        if local < 0.0 || self.duration <= 0.0 {
            return None;
        }
        Some(local.rem_euclid(self.duration) / self.duration)
    }

    /// Vertical position (percent from the top) at `t_secs`.
    pub fn top_percent(&self, t_secs: f64) -> Option<f64> {
        self.progress(t_secs)
            .map(|p| START_Y + (END_Y - START_Y) * p)
    }
}
