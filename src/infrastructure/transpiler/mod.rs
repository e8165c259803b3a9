//! Transpiler Implementations

mod esbuild;

pub use esbuild::EsbuildTranspiler;
