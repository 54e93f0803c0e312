// Tokenizer - splits free text into lookup tokens
// Separators are whitespace, comma variants and sentence-ending punctuation
// in both Chinese and Latin script.

/// Separator characters besides whitespace
pub const DEFAULT_SEPARATORS: &[char] = &['，', ',', '、', '。', '！', '？', '.', '!', '?'];

/// Splits text into an ordered sequence of non-empty tokens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokenizer {
    separators: Vec<char>,
}

impl Tokenizer {
    /// Create a tokenizer using the default separator set
    pub fn new() -> Self {
        Self::with_separators(DEFAULT_SEPARATORS)
    }

    /// Create a tokenizer that splits on whitespace plus the given characters
    pub fn with_separators(separators: &[char]) -> Self {
        Self {
            separators: separators.to_vec(),
        }
    }

    fn is_separator(&self, c: char) -> bool {
        c.is_whitespace() || self.separators.contains(&c)
    }

    /// Split text into trimmed, non-empty tokens in order of appearance
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        text.split(|c| self.is_separator(c))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tokenizer_test.rs"]
mod tests;
