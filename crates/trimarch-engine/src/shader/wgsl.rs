use std::collections::BTreeMap;

use naga::valid::{Capabilities, ValidationFlags, Validator};

use super::compiler::{ShaderCompiler, ShaderStage};
use crate::geometry::Vertex;

/// WGSL source and the entry point chosen for its stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageSource {
    pub source: String,
    pub entry_point: String,
}

/// Outcome of compiling one stage with [`NagaCompiler`].
#[derive(Debug)]
pub struct CompiledShader {
    stage: ShaderStage,
    source: String,
    compiled: Option<(naga::Module, String)>,
    log: String,
}

impl CompiledShader {
    #[inline]
    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    /// Entry point name, if compilation succeeded.
    pub fn entry_point(&self) -> Option<&str> {
        self.compiled.as_ref().map(|(_, name)| name.as_str())
    }
}

/// Linked vertex + fragment pair with matching stage interfaces.
///
/// Only a program whose link status passed is handed to the renderer.
#[derive(Debug, Clone)]
pub struct ShaderProgram {
    pub vertex: StageSource,
    pub fragment: StageSource,
    log: String,
}

/// Headless WGSL compiler backed by `naga`.
///
/// - compile: parse, validate, and require an entry point for the stage
/// - link: every vertex input location must be supplied by the vertex
///   buffer layout with a compatible scalar kind, and every fragment input
///   location must be written by the vertex stage with the same type
pub struct NagaCompiler {
    validator: Validator,
    vertex_attributes: Vec<wgpu::VertexAttribute>,
}

impl NagaCompiler {
    /// Links against the triangle vertex layout ([`Vertex::layout`]).
    pub fn new() -> Self {
        Self::with_vertex_attributes(&Vertex::ATTRS)
    }

    pub fn with_vertex_attributes(attributes: &[wgpu::VertexAttribute]) -> Self {
        Self {
            validator: Validator::new(ValidationFlags::all(), Capabilities::empty()),
            vertex_attributes: attributes.to_vec(),
        }
    }

    fn check_vertex_inputs(&self, module: &naga::Module, entry_point: &str, errors: &mut Vec<String>) {
        for (location, ty) in stage_interface(module, entry_point, Direction::Input) {
            let Some(attr) = self
                .vertex_attributes
                .iter()
                .find(|a| a.shader_location == location)
            else {
                errors.push(format!(
                    "error: vertex input at location {location} is not supplied by the vertex buffer"
                ));
                continue;
            };

            let supplied = attribute_scalar_kind(attr.format);
            if ty.scalar_kind() != Some(supplied) {
                errors.push(format!(
                    "error: vertex input at location {location} reads {ty:?}, vertex buffer supplies {:?}",
                    attr.format
                ));
            }
        }
    }

    fn translate(
        &mut self,
        stage: ShaderStage,
        source: &str,
    ) -> Result<(naga::Module, String), String> {
        let module = naga::front::wgsl::parse_str(source).map_err(|e| e.emit_to_string(source))?;

        self.validator
            .validate(&module)
            .map_err(|e| e.emit_to_string(source))?;

        let entry = module
            .entry_points
            .iter()
            .find(|ep| ep.stage == stage.to_naga())
            .ok_or_else(|| format!("error: no @{stage} entry point in {stage} shader source"))?;
        let name = entry.name.clone();

        Ok((module, name))
    }
}

impl Default for NagaCompiler {
    fn default() -> Self {
        Self::new()
    }
}

impl ShaderCompiler for NagaCompiler {
    type Shader = CompiledShader;
    type Program = ShaderProgram;

    fn compile(&mut self, stage: ShaderStage, source: &str) -> CompiledShader {
        let (compiled, log) = match self.translate(stage, source) {
            Ok(compiled) => (Some(compiled), String::new()),
            Err(log) => (None, log),
        };

        CompiledShader {
            stage,
            source: source.to_owned(),
            compiled,
            log,
        }
    }

    fn compile_status(&self, shader: &CompiledShader) -> bool {
        shader.compiled.is_some()
    }

    fn compile_log(&self, shader: &CompiledShader) -> String {
        shader.log.clone()
    }

    fn link(&mut self, vertex: &CompiledShader, fragment: &CompiledShader) -> ShaderProgram {
        let mut errors = Vec::new();

        match (&vertex.compiled, &fragment.compiled) {
            (Some((vm, vs_entry)), Some((fm, fs_entry))) => {
                self.check_vertex_inputs(vm, vs_entry, &mut errors);

                let outputs = stage_interface(vm, vs_entry, Direction::Output);
                let inputs = stage_interface(fm, fs_entry, Direction::Input);

                for (location, ty) in &inputs {
                    match outputs.get(location) {
                        None => errors.push(format!(
                            "error: fragment input at location {location} is not written by the vertex stage"
                        )),
                        Some(out) if out != ty => errors.push(format!(
                            "error: location {location} type mismatch: vertex writes {out:?}, fragment reads {ty:?}"
                        )),
                        Some(_) => {}
                    }
                }
            }
            _ => errors.push("error: cannot link shaders that failed to compile".to_owned()),
        }

        ShaderProgram {
            vertex: StageSource {
                source: vertex.source.clone(),
                entry_point: vertex.entry_point().unwrap_or_default().to_owned(),
            },
            fragment: StageSource {
                source: fragment.source.clone(),
                entry_point: fragment.entry_point().unwrap_or_default().to_owned(),
            },
            log: errors.join("\n"),
        }
    }

    fn link_status(&self, program: &ShaderProgram) -> bool {
        program.log.is_empty()
    }

    fn link_log(&self, program: &ShaderProgram) -> String {
        program.log.clone()
    }
}

/// Scalar kind a shader sees when reading an attribute of `format`.
fn attribute_scalar_kind(format: wgpu::VertexFormat) -> naga::ScalarKind {
    use wgpu::VertexFormat as F;
    match format {
        F::Uint8x2 | F::Uint8x4 | F::Uint16x2 | F::Uint16x4 | F::Uint32 | F::Uint32x2
        | F::Uint32x3 | F::Uint32x4 => naga::ScalarKind::Uint,
        F::Sint8x2 | F::Sint8x4 | F::Sint16x2 | F::Sint16x4 | F::Sint32 | F::Sint32x2
        | F::Sint32x3 | F::Sint32x4 => naga::ScalarKind::Sint,
        // Float, normalized and packed formats.
        _ => naga::ScalarKind::Float,
    }
}

#[derive(Copy, Clone)]
enum Direction {
    Input,
    Output,
}

/// Location-bound values an entry point reads (`Input`) or writes (`Output`).
fn stage_interface(
    module: &naga::Module,
    entry_point: &str,
    direction: Direction,
) -> BTreeMap<u32, naga::TypeInner> {
    let mut out = BTreeMap::new();
    let Some(ep) = module.entry_points.iter().find(|ep| ep.name == entry_point) else {
        return out;
    };

    match direction {
        Direction::Input => {
            for arg in &ep.function.arguments {
                collect_locations(module, arg.ty, arg.binding.as_ref(), &mut out);
            }
        }
        Direction::Output => {
            if let Some(result) = &ep.function.result {
                collect_locations(module, result.ty, result.binding.as_ref(), &mut out);
            }
        }
    }

    out
}

fn collect_locations(
    module: &naga::Module,
    ty: naga::Handle<naga::Type>,
    binding: Option<&naga::Binding>,
    out: &mut BTreeMap<u32, naga::TypeInner>,
) {
    match binding {
        Some(naga::Binding::Location { location, .. }) => {
            out.insert(*location, module.types[ty].inner.clone());
        }
        // Builtins are not part of the user interface.
        Some(_) => {}
        None => {
            if let naga::TypeInner::Struct { members, .. } = &module.types[ty].inner {
                for member in members {
                    collect_locations(module, member.ty, member.binding.as_ref(), out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VS: &str = include_str!("builtin/triangle.vert.wgsl");
    const FS: &str = include_str!("builtin/triangle.frag.wgsl");

    const FS_READS_LOCATION_3: &str = "
@fragment
fn fs_main(@location(3) tint: vec3<f32>) -> @location(0) vec4<f32> {
    return vec4<f32>(tint, 1.0);
}
";

    const FS_READS_VEC4: &str = "
@fragment
fn fs_main(@location(0) color: vec4<f32>) -> @location(0) vec4<f32> {
    return color;
}
";

    const VS_READS_LOCATION_2: &str = "
struct VertexOut {
    @builtin(position) clip: vec4<f32>,
    @location(0) color: vec3<f32>,
};

@vertex
fn vs_main(@location(0) position: vec2<f32>, @location(2) extra: vec2<f32>) -> VertexOut {
    var out: VertexOut;
    out.clip = vec4<f32>(position + extra, 0.0, 1.0);
    out.color = vec3<f32>(1.0, 1.0, 1.0);
    return out;
}
";

    const VS_READS_INT_POSITION: &str = "
struct VertexOut {
    @builtin(position) clip: vec4<f32>,
    @location(0) color: vec3<f32>,
};

@vertex
fn vs_main(@location(0) position: vec2<i32>, @location(1) color: vec3<f32>) -> VertexOut {
    var out: VertexOut;
    out.clip = vec4<f32>(vec2<f32>(position), 0.0, 1.0);
    out.color = color;
    return out;
}
";

    const VS_POSITION_ONLY: &str = "
struct VertexOut {
    @builtin(position) clip: vec4<f32>,
    @location(0) color: vec3<f32>,
};

@vertex
fn vs_main(@location(0) position: vec2<f32>) -> VertexOut {
    var out: VertexOut;
    out.clip = vec4<f32>(position, 0.0, 1.0);
    out.color = vec3<f32>(1.0, 1.0, 1.0);
    return out;
}
";

    fn link_pair(c: &mut NagaCompiler, vs_src: &str, fs_src: &str) -> ShaderProgram {
        let vs = c.compile(ShaderStage::Vertex, vs_src);
        let fs = c.compile(ShaderStage::Fragment, fs_src);
        assert!(c.compile_status(&vs), "{}", c.compile_log(&vs));
        assert!(c.compile_status(&fs), "{}", c.compile_log(&fs));
        c.link(&vs, &fs)
    }

    // ── compile ───────────────────────────────────────────────────────────

    #[test]
    fn builtin_stages_compile() {
        let mut c = NagaCompiler::new();
        let vs = c.compile(ShaderStage::Vertex, VS);
        let fs = c.compile(ShaderStage::Fragment, FS);

        assert!(c.compile_status(&vs), "{}", c.compile_log(&vs));
        assert!(c.compile_status(&fs), "{}", c.compile_log(&fs));
        assert_eq!(vs.entry_point(), Some("vs_main"));
        assert_eq!(fs.entry_point(), Some("fs_main"));
        assert!(c.compile_log(&vs).is_empty());
    }

    #[test]
    fn syntax_error_fails_with_diagnostic() {
        let mut c = NagaCompiler::new();
        let vs = c.compile(ShaderStage::Vertex, "@vertex fn vs_main( -> {");
        assert!(!c.compile_status(&vs));
        assert!(!c.compile_log(&vs).is_empty());
        assert_eq!(vs.entry_point(), None);
    }

    #[test]
    fn validation_error_fails() {
        let mut c = NagaCompiler::new();
        // Returns a scalar where a vec4 is declared.
        let src = "
@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return 1.0;
}
";
        let fs = c.compile(ShaderStage::Fragment, src);
        assert!(!c.compile_status(&fs));
    }

    #[test]
    fn wrong_stage_is_rejected() {
        let mut c = NagaCompiler::new();
        let fs_as_vs = c.compile(ShaderStage::Vertex, FS);
        assert!(!c.compile_status(&fs_as_vs));
        assert!(c.compile_log(&fs_as_vs).contains("@vertex"));
    }

    // ── link ──────────────────────────────────────────────────────────────

    #[test]
    fn builtin_pair_links() {
        let mut c = NagaCompiler::new();
        let vs = c.compile(ShaderStage::Vertex, VS);
        let fs = c.compile(ShaderStage::Fragment, FS);
        let program = c.link(&vs, &fs);

        assert!(c.link_status(&program), "{}", c.link_log(&program));
        assert_eq!(program.vertex.entry_point, "vs_main");
        assert_eq!(program.fragment.entry_point, "fs_main");
        assert_eq!(program.vertex.source, VS);
    }

    #[test]
    fn unwritten_fragment_input_fails_link() {
        let mut c = NagaCompiler::new();
        let vs = c.compile(ShaderStage::Vertex, VS);
        let fs = c.compile(ShaderStage::Fragment, FS_READS_LOCATION_3);
        assert!(c.compile_status(&fs), "{}", c.compile_log(&fs));

        let program = c.link(&vs, &fs);
        assert!(!c.link_status(&program));
        assert!(c.link_log(&program).contains("location 3"));
    }

    #[test]
    fn mismatched_interface_type_fails_link() {
        let mut c = NagaCompiler::new();
        let vs = c.compile(ShaderStage::Vertex, VS);
        let fs = c.compile(ShaderStage::Fragment, FS_READS_VEC4);
        assert!(c.compile_status(&fs), "{}", c.compile_log(&fs));

        let program = c.link(&vs, &fs);
        assert!(!c.link_status(&program));
        assert!(c.link_log(&program).contains("type mismatch"));
    }

    #[test]
    fn uncompiled_stage_cannot_link() {
        let mut c = NagaCompiler::new();
        let vs = c.compile(ShaderStage::Vertex, "not wgsl");
        let fs = c.compile(ShaderStage::Fragment, FS);
        let program = c.link(&vs, &fs);
        assert!(!c.link_status(&program));
    }

    // ── link: vertex buffer layout ───────────────────────────────────────

    #[test]
    fn vertex_input_without_buffer_attribute_fails_link() {
        let mut c = NagaCompiler::new();
        let program = link_pair(&mut c, VS_READS_LOCATION_2, FS);
        assert!(!c.link_status(&program));
        assert!(c.link_log(&program).contains("location 2"));
    }

    #[test]
    fn integer_read_of_float_attribute_fails_link() {
        let mut c = NagaCompiler::new();
        let program = link_pair(&mut c, VS_READS_INT_POSITION, FS);
        assert!(!c.link_status(&program));
        let log = c.link_log(&program);
        assert!(log.contains("location 0"), "{log}");
        assert!(log.contains("Float32x2"), "{log}");
    }

    #[test]
    fn unread_buffer_attributes_are_allowed() {
        let mut c = NagaCompiler::new();
        let program = link_pair(&mut c, VS_POSITION_ONLY, FS);
        assert!(c.link_status(&program), "{}", c.link_log(&program));
    }

    #[test]
    fn custom_attribute_list_is_honored() {
        let mut c = NagaCompiler::with_vertex_attributes(&Vertex::ATTRS[..1]);
        let program = link_pair(&mut c, VS, FS);
        assert!(!c.link_status(&program));
        assert!(c.link_log(&program).contains("location 1"));
    }

    #[test]
    fn attribute_formats_map_to_shader_scalars() {
        assert_eq!(attribute_scalar_kind(wgpu::VertexFormat::Float32x3), naga::ScalarKind::Float);
        assert_eq!(attribute_scalar_kind(wgpu::VertexFormat::Unorm8x4), naga::ScalarKind::Float);
        assert_eq!(attribute_scalar_kind(wgpu::VertexFormat::Sint32x2), naga::ScalarKind::Sint);
        assert_eq!(attribute_scalar_kind(wgpu::VertexFormat::Uint16x2), naga::ScalarKind::Uint);
    }

    #[test]
    fn vertex_outputs_skip_builtins() {
        let mut c = NagaCompiler::new();
        let vs = c.compile(ShaderStage::Vertex, VS);
        let (module, entry) = vs.compiled.as_ref().unwrap();
        let outputs = stage_interface(module, entry, Direction::Output);
        assert_eq!(outputs.keys().copied().collect::<Vec<_>>(), vec![0]);

        let inputs = stage_interface(module, entry, Direction::Input);
        assert_eq!(inputs.keys().copied().collect::<Vec<_>>(), vec![0, 1]);
    }
}
