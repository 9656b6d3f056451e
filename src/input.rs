//! Limits applied to untrusted input before it reaches the checker.

use crate::errors::InputError;

pub const MAX_TEXT_CHARS: usize = 10_000;
pub const MAX_WORD_CHARS: usize = 100;

/// Trim `text` and make sure it is neither empty nor longer than [`MAX_TEXT_CHARS`].
pub fn validate_text(text: &str) -> Result<&str, InputError> {
    validate(text, MAX_TEXT_CHARS)
}

/// Trim `word` and make sure it is neither empty nor longer than [`MAX_WORD_CHARS`].
pub fn validate_word(word: &str) -> Result<&str, InputError> {
    validate(word, MAX_WORD_CHARS)
}

fn validate(input: &str, max: usize) -> Result<&str, InputError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(InputError::Empty);
    }

    let length = trimmed.chars().count();
    if length > max {
        return Err(InputError::TooLong { length, max });
    }

    Ok(trimmed)
}
