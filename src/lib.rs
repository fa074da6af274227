//! Gem Cascade (workspace facade crate).
//!
//! Re-exports the workspace crates as `gem_cascade::{core, engine, types}` so
//! callers and integration tests depend on one package while the
//! implementation lives in dedicated crates under `crates/`.

pub use gem_cascade_core as core;
pub use gem_cascade_engine as engine;
pub use gem_cascade_types as types;
