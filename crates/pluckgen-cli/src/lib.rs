//! pluckgen CLI library.
//!
//! This crate provides the note catalog, generation settings and command
//! implementations behind the `pluckgen` binary.

pub mod catalog;
pub mod commands;
pub mod config;

pub use catalog::{CatalogReport, KarplusRenderer, Note, NoteCatalog, NoteOutcome, ToneRenderer};
pub use config::{ConfigOverrides, GenerateConfig};
