// Candidate selection state - the caller-owned result of one translation request

use serde::Serialize;

use super::Direction;

/// Error types for candidate selection
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("Token index {index} out of range (have {len} tokens)")]
    TokenOutOfRange { index: usize, len: usize },
    #[error("Candidate index {index} out of range for token {token_index} (have {len} candidates)")]
    CandidateOutOfRange {
        token_index: usize,
        index: usize,
        len: usize,
    },
}

/// A token with its ordered, distinct candidates and the current choice
///
/// The candidate list is never empty: without matches it holds the token itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateSet {
    original: String,
    translations: Vec<String>,
    selected_index: usize,
}

impl CandidateSet {
    /// Build a set, dropping repeated candidates and falling back to the token
    pub fn new(original: String, candidates: Vec<String>) -> Self {
        let mut translations: Vec<String> = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            if !translations.contains(&candidate) {
                translations.push(candidate);
            }
        }
        if translations.is_empty() {
            translations.push(original.clone());
        }

        Self {
            original,
            translations,
            selected_index: 0,
        }
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn candidates(&self) -> &[String] {
        &self.translations
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    /// Currently chosen candidate
    pub fn selected(&self) -> &str {
        &self.translations[self.selected_index]
    }

    /// True when the only candidate is the untranslated token
    pub fn is_fallback(&self) -> bool {
        self.translations.len() == 1 && self.translations[0] == self.original
    }
}

/// Candidate sets for every token of one translation, plus the direction used
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationSelection {
    direction: Direction,
    sets: Vec<CandidateSet>,
}

/// Input for the next request after swapping direction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapResult {
    pub text: String,
    pub direction: Direction,
}

impl TranslationSelection {
    pub fn new(direction: Direction, sets: Vec<CandidateSet>) -> Self {
        Self { direction, sets }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn candidate_sets(&self) -> &[CandidateSet] {
        &self.sets
    }

    pub fn into_candidate_sets(self) -> Vec<CandidateSet> {
        self.sets
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Choose candidate `candidate_index` for token `token_index`
    ///
    /// Other tokens keep their selection. Out-of-range indices leave the
    /// state untouched.
    pub fn select(
        &mut self,
        token_index: usize,
        candidate_index: usize,
    ) -> Result<(), SelectionError> {
        let len = self.sets.len();
        let set = self
            .sets
            .get_mut(token_index)
            .ok_or(SelectionError::TokenOutOfRange {
                index: token_index,
                len,
            })?;

        if candidate_index >= set.translations.len() {
            return Err(SelectionError::CandidateOutOfRange {
                token_index,
                index: candidate_index,
                len: set.translations.len(),
            });
        }

        set.selected_index = candidate_index;
        Ok(())
    }

    /// Selected candidates joined with single spaces, in token order
    pub fn compose_selection(&self) -> String {
        self.sets
            .iter()
            .map(CandidateSet::selected)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Turn the composed selection into the input for the opposite direction
    ///
    /// Consumes the state; no candidate set survives a swap.
    pub fn swap_direction(self) -> SwapResult {
        SwapResult {
            text: self.compose_selection(),
            direction: self.direction.reversed(),
        }
    }
}

#[cfg(test)]
#[path = "selection_test.rs"]
mod tests;
