//! Domain Entities
//!
//! - `PageCache` - Per-source route list and dependency list across builds
//! - `PageModule` / `Component` - Validated module contracts
//! - `DocumentShell` - The outer HTML skeleton pages are inserted into

mod document;
mod page_cache;
mod page_module;

pub use document::{DocumentShell, Element, Node, ENTRY_ID};
pub use page_cache::{CacheEntry, PageCache};
pub use page_module::{Component, PageCapabilities, PageModule};
