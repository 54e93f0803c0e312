// Dictionary module - entry types, tokenizer, lookup engine and candidate selection

mod entry;
pub mod lookup;
pub mod selection;
pub mod tokenizer;

pub use entry::{Direction, LookupField, TranslationEntry, TranslationError, TranslationPage};
pub use lookup::{LookupEngine, LookupLimits};
pub use selection::{CandidateSet, SelectionError, SwapResult, TranslationSelection};
pub use tokenizer::Tokenizer;
