//! Shader setup.
//!
//! Source text comes from a [`ShaderSupplier`] (embedded literals or files),
//! is compiled per stage and linked through a [`ShaderCompiler`], and yields
//! a [`ShaderProgram`] the triangle renderer can build a pipeline from.
//!
//! Compile and link failures share one status-check path: query the
//! object's status, and on failure fetch and log its diagnostic.

mod compiler;
mod setup;
mod source;
mod status;
mod wgsl;

pub use compiler::{ShaderCompiler, ShaderStage};
pub use setup::{install_shaders, SetupError};
pub use source::{ShaderSources, ShaderSupplier, SourceError};
pub use wgsl::{CompiledShader, NagaCompiler, ShaderProgram, StageSource};
