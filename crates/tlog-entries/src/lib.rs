//! Entry type system for a signature transparency log
//!
//! This crate is the verification core that sits in front of an append-only
//! log: it accepts untrusted proposed entries, dispatches them through a
//! [`Registry`] of pluggable entry kinds, validates and cryptographically
//! verifies them, and produces deterministic canonical bytes plus search
//! index keys.
//!
//! # Example
//!
//! ```no_run
//! use tlog_entries::{pipeline, Registry};
//! use tlog_types::ProposedEntry;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = Registry::with_defaults();
//! let raw = std::fs::read("entry.json")?;
//! let proposed = ProposedEntry::from_json(&raw)?;
//!
//! let entry = pipeline::process(&registry, &proposed)?;
//! println!("canonical bytes: {}", entry.body.len());
//! for key in &entry.index_keys {
//!     println!("index key: {}", key);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Validation is the single authoritative gate: canonicalization re-runs it
//! internally, so canonical bytes exist only for entries that verify.

pub mod error;
pub mod hashedrekord;
pub mod pipeline;
pub mod registry;
pub mod types;

pub use error::{EntryError, Result};
pub use pipeline::CanonicalizedEntry;
pub use registry::Registry;
pub use types::{EntryImpl, SignatureMaterial};
