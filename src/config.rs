//! Greeting configuration: who the page is for and which word they spell.

use crate::error::ConfigError;
use crate::{ALPHABET, DEFAULT_RECIPIENT, TARGET_WORD};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GreetingConfig {
    pub recipient: String,
    pub target_word: String,
}

impl Default for GreetingConfig {
    fn default() -> Self {
        Self {
            recipient: DEFAULT_RECIPIENT.to_string(),
            target_word: TARGET_WORD.to_string(),
        }
    }
}

impl GreetingConfig {
    /// Normalize (trim the name, upper-case the word) and check that every
    /// target glyph can actually be spawned.
    pub fn validate(self) -> Result<Self, ConfigError> {
        let recipient = self.recipient.trim().to_string();
        if recipient.is_empty() {
            return Err(ConfigError::EmptyRecipient);
        }
        let target_word = self.target_word.trim().to_uppercase();
        if target_word.is_empty() {
            return Err(ConfigError::EmptyTargetWord);
        }
        if let Some(bad) = target_word.chars().find(|c| !ALPHABET.contains(c)) {
            return Err(ConfigError::UnsupportedGlyph(bad));
        }
        Ok(Self {
            recipient,
            target_word,
        })
    }

    pub fn target_glyphs(&self) -> Vec<char> {
        self.target_word.chars().collect()
    }

    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self, crate::GreetingError> {
        let raw: GreetingConfig = serde_json::from_str(json)?;
        Ok(raw.validate()?)
    }
}
