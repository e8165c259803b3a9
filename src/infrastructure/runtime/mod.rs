//! Page Runtime Implementations

mod node;

pub use node::NodeRuntime;
