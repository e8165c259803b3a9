//! Stylesheet Processor Implementations

mod postcss;

pub use postcss::{PostcssCli, POSTCSS_CONFIG};
