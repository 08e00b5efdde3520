//! Data models for dynamod.
//!
//! Field names on the wire match what dynamic-feature clients already parse,
//! so renames here are load-bearing.

mod module;
mod responses;

pub use module::*;
pub use responses::*;
