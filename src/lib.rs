//! # Arealift - Legacy Area File Migration
//!
//! Arealift ingests the line-oriented "area" definition files used by
//! ROM-derived text game engines and converts them into a normalized
//! entity graph for a modern backend: rooms wired together by directional
//! exits, plus mobiles, items, shops, repopulation resets, and
//! special-function bindings, all keyed by freshly allocated stable ids.
//!
//! The format is legacy and inconsistently enforced, so the parser is
//! tolerant by design: malformed tokens degrade to documented defaults,
//! broken entities are dropped and logged, and only an unreadable file
//! fails a whole pass. Forward references between rooms are handled by
//! allocating every room's id before any room's fields are extracted.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use arealift::area::Area;
//! use arealift::sink::MemorySink;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let area = Area::load("midgaard.are").await?;
//!     println!("{} rooms", area.area.total_rooms);
//!
//!     let sink = MemorySink::new();
//!     area.deliver(&sink).await;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`area`] - Section splitting, entity extraction, id allocation, and
//!   exit resolution
//! - [`sink`] - The record sink port plus HTTP and in-memory impls
//! - [`config`] - Configuration loading and validation
//! - [`logutil`] - Log-safe rendering of legacy text

pub mod area;
pub mod config;
pub mod logutil;
pub mod sink;
