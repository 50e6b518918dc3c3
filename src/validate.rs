//! Local input checks that run before any request is sent.

use std::ops::RangeInclusive;

/// Smallest accepted draft, in characters.
pub const MIN_CHARS: usize = 100;
/// Largest accepted draft, in characters.
pub const MAX_CHARS: usize = 8000;

/// Reasons a form is rejected without contacting the server.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("内容を入力してください。")]
    EmptyContent,

    #[error("{min}文字以上入力してください。")]
    TooShort { min: usize },

    #[error("{max}文字以下にしてください。")]
    TooLong { max: usize },

    /// The slide-content form was submitted blank.
    #[error("プレゼンテーション内容を入力してください。")]
    EmptyPresentation,

    #[error("ファイルを選択してください。")]
    MissingFile,

    #[error("カテゴリを選択してください。")]
    MissingCategory,

    #[error("品質を選択してください。")]
    MissingQuality,

    /// Another submission from the same form is still running.
    #[error("送信処理中です。しばらくお待ちください。")]
    Busy,
}

/// Character bounds a draft must fall within, both ends inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentBounds {
    range: RangeInclusive<usize>,
}

impl ContentBounds {
    pub fn new(min: usize, max: usize) -> Self {
        Self { range: min..=max }
    }

    pub fn min(&self) -> usize {
        *self.range.start()
    }

    pub fn max(&self) -> usize {
        *self.range.end()
    }

    pub fn contains(&self, len: usize) -> bool {
        self.range.contains(&len)
    }
}

impl Default for ContentBounds {
    fn default() -> Self {
        Self::new(MIN_CHARS, MAX_CHARS)
    }
}

/// Character count as the counter and the validator see it.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Check a draft against `bounds`, returning the trimmed text to submit.
pub fn validate_content<'a>(
    text: &'a str,
    bounds: &ContentBounds,
) -> Result<&'a str, ValidationError> {
    let trimmed = text.trim();
    let len = char_len(trimmed);
    if len == 0 {
        return Err(ValidationError::EmptyContent);
    }
    if len < bounds.min() {
        return Err(ValidationError::TooShort { min: bounds.min() });
    }
    if len > bounds.max() {
        return Err(ValidationError::TooLong { max: bounds.max() });
    }
    Ok(trimmed)
}
