//! nexus-file - Filesystem-backed credential store.
//!
//! The browser clients keep their session in local storage; this crate plays
//! the same role for native processes with a single JSON document on disk.

mod store;

pub use store::FileStore;
