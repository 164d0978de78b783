//! Stage sequencing: welcome -> letters -> question -> celebration.

use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Stage {
    #[default]
    Welcome,
    Letters,
    Question,
    Celebration,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Welcome => "welcome",
            Stage::Letters => "letters",
            Stage::Question => "question",
            Stage::Celebration => "celebration",
        }
    }

    pub fn is_terminal(self) -> bool {
        self == Stage::Celebration
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Signals that move the greeting forward.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trigger {
    /// "Open Message" pressed on the welcome card.
    Start,
    /// Delayed game-complete signal from the letter field.
    LettersComplete,
    /// "Yes!" pressed on the question card.
    Accept,
}

#[derive(Debug, Default)]
pub struct StageMachine {
    stage: Stage,
}

impl StageMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Apply a trigger. Returns the new stage when it caused a transition;
    /// a trigger that does not belong to the current stage changes nothing.
    pub fn fire(&mut self, trigger: Trigger) -> Option<Stage> {
        let next = match (self.stage, trigger) {
            (Stage::Welcome, Trigger::Start) => Stage::Letters,
            (Stage::Letters, Trigger::LettersComplete) => Stage::Question,
            (Stage::Question, Trigger::Accept) => Stage::Celebration,
            (stage, trigger) => {
                log::trace!("{trigger:?} ignored in {stage}");
                return None;
            }
        };
        log::info!("stage {} -> {}", self.stage, next);
        self.stage = next;
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Trigger; 3] = [Trigger::Start, Trigger::LettersComplete, Trigger::Accept];

    #[test]
    fn walks_the_linear_path() {
        let mut m = StageMachine::new();
        assert_eq!(m.stage(), Stage::Welcome);
        assert_eq!(m.fire(Trigger::Start), Some(Stage::Letters));
        assert_eq!(m.fire(Trigger::LettersComplete), Some(Stage::Question));
        assert_eq!(m.fire(Trigger::Accept), Some(Stage::Celebration));
        assert!(m.stage().is_terminal());
    }

    #[test]
    fn out_of_order_triggers_are_ignored() {
        let mut m = StageMachine::new();
        assert_eq!(m.fire(Trigger::Accept), None);
        assert_eq!(m.fire(Trigger::LettersComplete), None);
        assert_eq!(m.stage(), Stage::Welcome);
        m.fire(Trigger::Start);
        assert_eq!(m.fire(Trigger::Start), None);
        assert_eq!(m.fire(Trigger::Accept), None);
        assert_eq!(m.stage(), Stage::Letters);
    }

    #[test]
    fn celebration_is_final() {
        let mut m = StageMachine::new();
        for t in ALL {
            m.fire(t);
        }
        assert_eq!(m.stage(), Stage::Celebration);
        for _ in 0..3 {
            for t in ALL {
                assert_eq!(m.fire(t), None);
            }
        }
        assert_eq!(m.stage(), Stage::Celebration);
    }

    #[test]
    fn stage_names() {
        assert_eq!(Stage::Welcome.to_string(), "welcome");
        assert_eq!(Stage::Celebration.as_str(), "celebration");
    }
}
