// Lookup engine - resolves tokens to candidate renderings against the entry store
//
// Each token is matched exactly first; the substring query only runs when the
// exact query finds nothing. Lookups for the tokens of one text run
// concurrently and are gathered back in token order.

use std::collections::HashSet;
use std::sync::Arc;

use futures_util::future::join_all;

use super::selection::{CandidateSet, TranslationSelection};
use super::tokenizer::Tokenizer;
use super::{Direction, TranslationEntry, TranslationError};
use crate::storage::EntryStoreBackend;

/// Default cap on exact-match rows per token
pub const DEFAULT_EXACT_LIMIT: usize = 5;

/// Default cap on substring-match rows per token
pub const DEFAULT_PARTIAL_LIMIT: usize = 3;

/// Row caps for the two query branches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupLimits {
    pub exact: usize,
    pub partial: usize,
}

impl Default for LookupLimits {
    fn default() -> Self {
        Self {
            exact: DEFAULT_EXACT_LIMIT,
            partial: DEFAULT_PARTIAL_LIMIT,
        }
    }
}

/// Word-by-word lookup over an entry store
#[derive(Clone)]
pub struct LookupEngine {
    store: Arc<dyn EntryStoreBackend>,
    tokenizer: Tokenizer,
    limits: LookupLimits,
}

impl LookupEngine {
    pub fn new(store: Arc<dyn EntryStoreBackend>, limits: LookupLimits) -> Self {
        Self {
            store,
            tokenizer: Tokenizer::new(),
            limits,
        }
    }

    /// Replace the tokenizer used by `translate`
    pub fn with_tokenizer(mut self, tokenizer: Tokenizer) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    pub fn limits(&self) -> LookupLimits {
        self.limits
    }

    /// Deduplicated candidates for one token, without the identity fallback
    ///
    /// Store failures propagate so the caller decides how to degrade.
    pub async fn candidates(
        &self,
        token: &str,
        direction: Direction,
    ) -> Result<Vec<String>, TranslationError> {
        let field = direction.lookup_field();

        let mut rows = self
            .store
            .find_exact(field, token, self.limits.exact)
            .await?;

        if rows.is_empty() {
            rows = self
                .store
                .find_substring(field, token, self.limits.partial)
                .await?;
        }

        Ok(collect_candidates(&rows, direction))
    }

    /// Candidate set for one token
    ///
    /// Never fails: a store error or an empty result both yield the token
    /// itself as the only candidate.
    pub async fn lookup(&self, token: &str, direction: Direction) -> CandidateSet {
        let candidates = match self.candidates(token, direction).await {
            Ok(candidates) => candidates,
            Err(e) => {
                let error = TranslationError::Lookup {
                    token: token.to_string(),
                    message: e.to_string(),
                };
                crate::warn!("{}", error);
                Vec::new()
            }
        };

        CandidateSet::new(token.to_string(), candidates)
    }

    /// Tokenize `text` and look every token up
    ///
    /// The returned selection holds one candidate set per token, in input order.
    pub async fn translate(&self, text: &str, direction: Direction) -> TranslationSelection {
        let tokens = self.tokenizer.tokenize(text);
        crate::debug!(
            "Translating {} tokens ({} -> {})",
            tokens.len(),
            direction,
            direction.reversed()
        );

        let sets = join_all(tokens.iter().map(|token| self.lookup(token, direction))).await;
        TranslationSelection::new(direction, sets)
    }
}

/// Read the candidate field from matched rows, keeping first occurrences only
fn collect_candidates(rows: &[TranslationEntry], direction: Direction) -> Vec<String> {
    let field = direction.candidate_field();
    let mut seen = HashSet::new();
    rows.iter()
        .map(|row| row.field(field))
        .filter(|value| seen.insert(*value))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
#[path = "lookup_test.rs"]
mod tests;
