//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod change;
mod config_warning;
mod hash;
mod path;
mod propagation;
mod route;

pub use change::{BuildRequest, ChangeEvent, ChangeKind};
pub use config_warning::ConfigWarning;
pub use hash::ContentHash;
pub use path::{is_module_file, is_shell_module, normalize_lexically, MODULE_EXTENSION, SHELL_MODULES};
pub use propagation::Propagation;
pub use route::{join_route, normalize_route, Route, ROUTE_FILE};
