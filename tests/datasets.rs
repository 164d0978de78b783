// Integration tests for the constant word / message tables.
// These tests are native-friendly and avoid wasm/browser APIs.

use std::collections::HashSet;

use love_letters::hearts::HEARTS;
use love_letters::{ALPHABET, DECLINE_MESSAGES, DEFAULT_RECIPIENT, TARGET_WORD};

#[test]
fn alphabet_is_the_26_uppercase_letters() {
    assert_eq!(ALPHABET.len(), 26);
    let unique: HashSet<char> = ALPHABET.iter().copied().collect();
    assert_eq!(unique.len(), 26, "duplicate letter in ALPHABET");
    for c in ALPHABET {
        assert!(c.is_ascii_uppercase(), "'{}' is not an uppercase ASCII letter", c);
    }
}

#[test]
fn target_word_is_spawnable() {
    assert!(!TARGET_WORD.is_empty());
    for c in TARGET_WORD.chars() {
        assert!(ALPHABET.contains(&c), "'{}' in TARGET_WORD can never spawn", c);
    }
    assert!(!DEFAULT_RECIPIENT.trim().is_empty());
}

#[test]
fn decline_messages_are_unique_and_start_with_no() {
    assert_eq!(DECLINE_MESSAGES.len(), 8);
    assert_eq!(DECLINE_MESSAGES[0], "No");
    let mut seen = HashSet::new();
    for m in DECLINE_MESSAGES {
        assert!(!m.is_empty());
        assert!(seen.insert(*m), "duplicate decline message '{}'", m);
    }
}

#[test]
fn hearts_are_on_screen_and_loop() {
    for h in HEARTS.iter() {
        assert!((0.0..=100.0).contains(&h.left), "heart off screen at {}", h.left);
        assert!(h.duration > 0.0 && h.delay >= 0.0 && h.size > 0.0);
    }
}
