//! In-memory storage backend for testing and local invocation.
//!
//! Stores records in a `Vec` wrapped in `Arc<RwLock<_>>`. Data is not
//! persisted and will be lost when the store is dropped.
//!
//! # Example
//!
//! ```rust,ignore
//! use votetally::storage::inmemory::InMemoryItemStore;
//!
//! let store = InMemoryItemStore::new("Votes", "Id");
//! store.put(VoteRecord::new("YES", 3)).await;
//! ```

mod repository;

pub use repository::InMemoryItemStore;
