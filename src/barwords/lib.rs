//! # Barwords Architecture
//!
//! Barwords turns four dictionary words into a fixed-width barcode string and
//! back. The conversion core is a library; the `barwords` binary is one client
//! of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (main.rs, args.rs)                               │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands, fills config defaults         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Resolves layouts, maps failures to responses             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌───────────────────────────────┐ ┌───────────────────────────┐
//! │  Core                         │ │  Storage Layer (store/)   │
//! │  segment, layout, dictionary, │ │  LayoutStore trait,       │
//! │  engine                       │ │  FileStore, InMemoryStore │
//! └───────────────────────────────┘ └───────────────────────────┘
//! ```
//!
//! ## The Barcode Model
//!
//! A [`layout::Layout`] is an ordered list of [`segment::SegmentRule`]s. Each
//! rule owns a fixed-width slice of the barcode. Exactly four rules map to
//! words: their slice is the zero-padded index of a word in the
//! [`dictionary::WordDictionary`]. The other rules are checked on decode and
//! filled with placeholders on encode.
//!
//! A layout must pass [`layout::Layout::validate`] before the
//! [`engine::ConversionEngine`] will use it. Stores only hold validated
//! layouts.
//!
//! ## Keeping the Core Quiet
//!
//! The core takes values and returns typed errors. It never logs or prints.
//! Its only filesystem access is [`dictionary::WordDictionary::load`], a
//! read of the word list that callers opt into; encoding, decoding and
//! validation never touch the disk. Logging (`tracing`) starts at the storage
//! layer.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: One module per command
//! - [`store`]: Layout registry trait and implementations
//! - [`segment`]: Segment kinds and rules
//! - [`layout`]: Ordered rule lists and their validation
//! - [`dictionary`]: Word ↔ index lookup
//! - [`engine`]: Encode and decode
//! - [`protocol`]: Conversion request and response bodies
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod dictionary;
pub mod engine;
pub mod error;
pub mod layout;
pub mod protocol;
pub mod segment;
pub mod store;
