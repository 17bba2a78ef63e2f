use std::fmt;

use super::compiler::{ShaderCompiler, ShaderStage};
use super::source::ShaderSources;
use super::status::check_status;

/// Why shader setup did not produce a program.
///
/// The compiler diagnostic has already been logged when this is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    CompileFailed { stage: ShaderStage, log: String },
    LinkFailed { log: String },
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupError::CompileFailed { stage, .. } => {
                write!(f, "the {stage} shader failed to compile")
            }
            SetupError::LinkFailed { .. } => f.write_str("the shader program failed to link"),
        }
    }
}

impl std::error::Error for SetupError {}

/// Compiles both stages, then links them.
///
/// The vertex stage is checked before the fragment stage. Linking is only
/// attempted once both stages compiled.
pub fn install_shaders<C>(compiler: &mut C, sources: &ShaderSources) -> Result<C::Program, SetupError>
where
    C: ShaderCompiler,
{
    let vertex = compiler.compile(ShaderStage::Vertex, &sources.vertex);
    let fragment = compiler.compile(ShaderStage::Fragment, &sources.fragment);

    for (stage, shader) in [(ShaderStage::Vertex, &vertex), (ShaderStage::Fragment, &fragment)] {
        check_status(&*compiler, shader, C::compile_status, C::compile_log)
            .map_err(|log| SetupError::CompileFailed { stage, log })?;
    }

    let program = compiler.link(&vertex, &fragment);
    check_status(&*compiler, &program, C::link_status, C::link_log)
        .map_err(|log| SetupError::LinkFailed { log })?;

    log::debug!("shader program linked");
    Ok(program)
}
