//! Bounded, persistent log of past interactions.
//!
//! The log keeps at most [`MAX_ENTRIES`] records. Inserting beyond that evicts
//! the oldest ones, and listings come back newest first.

mod entry;
mod error;
mod store;


pub use entry::Entry;
pub use error::{HistoryError, HistoryResult};
pub use store::{HistoryStore, LOCK_TIMEOUT};

/// Maximum number of interactions kept on disk.
pub const MAX_ENTRIES: usize = 5;
