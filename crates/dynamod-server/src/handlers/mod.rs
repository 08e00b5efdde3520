//! HTTP route handlers, split by domain.

mod artifacts;
mod cache;
mod modules;
mod status;

pub use artifacts::{handle_download, handle_upload};
pub use cache::handle_cache_clear;
pub use modules::{handle_modules_list, handle_modules_metadata};
pub use status::{handle_health, handle_liveness, handle_root};
