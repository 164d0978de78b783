//! A single greeting session: the stage machine plus whatever component state
//! the current stage owns. Entering a stage mounts a fresh component; leaving
//! it drops the old one.

use rand::Rng;

use crate::config::GreetingConfig;
use crate::letters::{CollectOutcome, LetterField};
use crate::question::EvasiveButton;
use crate::stage::{Stage, StageMachine, Trigger};

pub struct Greeting {
    config: GreetingConfig,
    machine: StageMachine,
    letters: Option<LetterField>,
    button: Option<EvasiveButton>,
}

impl Greeting {
    /// `config` is expected to be validated already.
    pub fn new(config: GreetingConfig) -> Self {
        Self {
            config,
            machine: StageMachine::new(),
            letters: None,
            button: None,
        }
    }

    pub fn config(&self) -> &GreetingConfig {
        &self.config
    }

    pub fn recipient(&self) -> &str {
        &self.config.recipient
    }

    pub fn stage(&self) -> Stage {
        self.machine.stage()
    }

    pub fn letters(&self) -> Option<&LetterField> {
        self.letters.as_ref()
    }

    pub fn button(&self) -> Option<&EvasiveButton> {
        self.button.as_ref()
    }

    /// "Open Message". Returns true when the letters stage was entered.
    pub fn start(&mut self) -> bool {
        self.fire(Trigger::Start)
    }

    /// Spawner tick; no-op outside the letters stage.
    pub fn spawn_letter<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if let Some(field) = self.letters.as_mut() {
            field.spawn(rng);
        }
    }

    /// Mover tick; no-op outside the letters stage.
    pub fn advance_letters(&mut self) {
        if let Some(field) = self.letters.as_mut() {
            field.advance();
        }
    }

    pub fn collect(&mut self, id: u32) -> CollectOutcome {
        match self.letters.as_mut() {
            Some(field) => field.collect(id),
            None => CollectOutcome::Ignored,
        }
    }

    /// Delivered once the completion delay has elapsed. Refused unless the
    /// word is actually spelled.
    pub fn finish_letters(&mut self) -> bool {
        if !self.letters.as_ref().is_some_and(LetterField::is_complete) {
            return false;
        }
        self.fire(Trigger::LettersComplete)
    }

    pub fn decline<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if let Some(button) = self.button.as_mut() {
            button.decline(rng);
        }
    }

    pub fn dodge<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if let Some(button) = self.button.as_mut() {
            button.dodge(rng);
        }
    }

    /// "Yes!". No decline penalty applies.
    pub fn accept(&mut self) -> bool {
        self.fire(Trigger::Accept)
    }

    fn fire(&mut self, trigger: Trigger) -> bool {
        let Some(stage) = self.machine.fire(trigger) else {
            return false;
        };
        self.letters = None;
        self.button = None;
        match stage {
            Stage::Letters => {
                self.letters = Some(LetterField::new(self.config.target_glyphs()));
            }
            Stage::Question => self.button = Some(EvasiveButton::new()),
            Stage::Welcome | Stage::Celebration => {}
        }
        true
    }
}
