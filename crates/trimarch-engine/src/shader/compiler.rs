use std::fmt;

/// Pipeline stage a shader object is compiled for.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub(crate) fn to_naga(self) -> naga::ShaderStage {
        match self {
            ShaderStage::Vertex => naga::ShaderStage::Vertex,
            ShaderStage::Fragment => naga::ShaderStage::Fragment,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Compile/link service.
///
/// Compiling or linking always yields an object; success is queried
/// afterwards through the matching status call, and the diagnostic text
/// through the matching log call. Shader and program objects use separate
/// queries, which is what lets setup share one status-check routine for
/// both.
pub trait ShaderCompiler {
    type Shader;
    type Program;

    fn compile(&mut self, stage: ShaderStage, source: &str) -> Self::Shader;

    fn compile_status(&self, shader: &Self::Shader) -> bool;

    fn compile_log(&self, shader: &Self::Shader) -> String;

    fn link(&mut self, vertex: &Self::Shader, fragment: &Self::Shader) -> Self::Program;

    fn link_status(&self, program: &Self::Program) -> bool;

    fn link_log(&self, program: &Self::Program) -> String;
}
