//! Persisted identification history
//!
//! # Error Handling Strategy
//!
//! Persistence failures never propagate to callers:
//!
//! - **Read failures** (missing key, unreadable store, corrupt JSON, records that no longer match
//!   the schema): the history starts empty and the anomaly is logged at warn level.
//! - **Write failures**: logged at error level. The in-memory history keeps the change and the
//!   mutation reports [`Persisted::No`].
//!
//! The backing store is any [`ByteStore`]: [`FileStore`] on disk, [`MemoryStore`] in tests.

pub mod history;
pub mod kv;

pub use history::{HISTORY_KEY, HistoryStore, MAX_HISTORY, Persisted};
pub use kv::{ByteStore, FileStore, MemoryStore};
