//! Domain Layer
//!
//! The incremental page engine - pure logic without I/O dependencies.
//!
//! ## Structure
//!
//! - `entities/` - Page cache, validated page modules, document shell
//! - `value_objects/` - Change events, routes, content hashes, path helpers
//! - `services/` - Dependency extraction, invalidation, route resolution
//! - `ports/` - Interface definitions for infrastructure (fs, transpiler, runtime, events)
//!
//! ## Design Principles
//!
//! 1. **No I/O** - This layer never touches the file system or spawns processes directly
//! 2. **Pure Functions** - Services are stateless and testable
//! 3. **Ports & Adapters** - All I/O goes through trait-defined ports

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
