//! Domain Services
//!
//! Pure logic of the page engine. Nothing here touches the filesystem or
//! spawns processes, so every service is tested in isolation.

mod dependency_extractor;
mod invalidation;
mod route_resolver;

pub use dependency_extractor::extract_local_dependencies;
pub use invalidation::{InvalidationPlan, Invalidator};
pub use route_resolver::resolve_routes;
