//! # Botwatch Trade Store
//!
//! This crate is the read side of the trade archive: it loads a snapshot of trade
//! records and bot reference data and hands them to the analytics engine as plain data.
//!
//! ## Architectural Principles
//!
//! - **Layer 3 Adapter:** All file and format details stay in here. Callers get
//!   `Vec<Trade>` and `Vec<BotRef>` and never see the JSON layout.
//! - **Read-only:** The store never writes. Each load reads the current file, so the
//!   analytics always reflect the latest snapshot with no caching in between.
//!
//! ## Public API
//!
//! - `SnapshotRepository`: Points at a snapshot file and loads it.
//! - `Snapshot`: The deserialized document.
//! - `StoreError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod error;
pub mod repository;

// Re-export the key components to create a clean, public-facing API.
pub use error::StoreError;
pub use repository::{Snapshot, SnapshotRepository};
