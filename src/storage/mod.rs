//! Storage abstraction layer for translation entries.
//!
//! ## Usage
//!
//! ```ignore
//! use crate::storage::EntryStoreBackend;
//!
//! let rows = store.find_exact(LookupField::Chinese, "我", 5).await?;
//! ```

mod traits;

pub use traits::EntryStoreBackend;
