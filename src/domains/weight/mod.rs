//! Weight domain module.
//!
//! This module owns everything about recorded body weight:
//!
//! - `store.rs` - The `WeightEntry` model and the `WeightStore` persistence port
//! - `memory.rs` - In-process store, used in tests and with `MCP_WEIGHT_STORE=memory`
//! - `sqlite.rs` - SQLite-backed store (the default)
//! - `tracker.rs` - Log, history, and change computations over any store
//! - `error.rs` - Persistence error types
//!
//! The tools domain renders these results; nothing here formats text for clients.

mod error;
mod memory;
mod sqlite;
mod store;
mod tracker;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryWeightStore;
pub use sqlite::SqliteWeightStore;
pub use store::{WeightEntry, WeightStore};
pub use tracker::{ChangeOutcome, WeightTracker, weight_change};
