//! Page entry discovery for multi-page bundles.
//!
//! Scans a pages root directory and maps each immediate subdirectory to a
//! named build entry, one independent page bundle per directory.

pub mod discover;
pub mod map;

pub use discover::{discover, DiscoverError};
pub use map::EntryMap;
