use std::path::PathBuf;

use clap::Parser;
use trimarch_engine::geometry::{DrawMode, MAX_TRIS, X_DELTA};
use trimarch_engine::shader::ShaderSupplier;

/// What the window shows.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum Scene {
    /// One new triangle per frame marching to the right.
    #[default]
    March,
    /// A single full-viewport triangle drawn through an index buffer.
    Static,
}

/// Command line of the `trimarch` binary.
#[derive(Debug, Parser)]
#[command(name = "trimarch", version, about = "Draws one triangle per frame from a fixed-size vertex buffer")]
pub struct Cli {
    /// Vertex shader (WGSL); the embedded pair is used when omitted
    #[arg(value_name = "VERTEX_SHADER", requires = "fragment")]
    pub vertex: Option<PathBuf>,

    /// Fragment shader (WGSL)
    #[arg(value_name = "FRAGMENT_SHADER", requires = "vertex")]
    pub fragment: Option<PathBuf>,

    /// Keep every appended triangle on screen instead of only the newest
    #[arg(long, conflicts_with = "static_triangle")]
    pub accumulate: bool,

    /// Draw one static indexed triangle instead of the marching ones
    #[arg(long = "static")]
    pub static_triangle: bool,
}

/// Behavior of the marching-triangle demo.
#[derive(Debug, Clone)]
pub struct MarchConfig {
    /// Triangle slots reserved up front.
    pub capacity: usize,
    /// Horizontal step between consecutive triangles (clip-space units).
    pub x_delta: f32,
    pub draw_mode: DrawMode,
    pub scene: Scene,
    pub clear: wgpu::Color,
    pub shaders: ShaderSupplier,
}

impl Default for MarchConfig {
    fn default() -> Self {
        Self {
            capacity: MAX_TRIS,
            x_delta: X_DELTA,
            draw_mode: DrawMode::Latest,
            scene: Scene::March,
            clear: wgpu::Color::BLACK,
            shaders: ShaderSupplier::builtin(),
        }
    }
}

impl MarchConfig {
    /// Applies parsed command-line options on top of `self`.
    pub fn with_cli(mut self, cli: Cli) -> Self {
        if let (Some(vertex), Some(fragment)) = (cli.vertex, cli.fragment) {
            self.shaders = ShaderSupplier::files(vertex, fragment);
        }
        if cli.accumulate {
            self.draw_mode = DrawMode::Accumulated;
        }
        if cli.static_triangle {
            self.scene = Scene::Static;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("trimarch").chain(args.iter().copied()))
    }

    fn config(args: &[&str]) -> MarchConfig {
        MarchConfig::default().with_cli(parse(args).unwrap())
    }

    #[test]
    fn defaults_match_reference_demo() {
        let c = MarchConfig::default();
        assert_eq!(c.capacity, 20);
        assert_eq!(c.x_delta, 0.1);
        assert_eq!(c.draw_mode, DrawMode::Latest);
        assert_eq!(c.scene, Scene::March);
        assert_eq!(c.shaders, ShaderSupplier::builtin());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    // ── shader paths ──────────────────────────────────────────────────────

    #[test]
    fn no_args_keeps_embedded_shaders() {
        assert_eq!(config(&[]).shaders, ShaderSupplier::builtin());
    }

    #[test]
    fn two_paths_select_files() {
        let c = config(&["v.wgsl", "f.wgsl"]);
        assert_eq!(c.shaders, ShaderSupplier::files("v.wgsl", "f.wgsl"));
    }

    #[test]
    fn lone_vertex_path_is_rejected() {
        assert!(parse(&["v.wgsl"]).is_err());
    }

    #[test]
    fn third_path_is_rejected() {
        assert!(parse(&["v.wgsl", "f.wgsl", "extra.wgsl"]).is_err());
    }

    // ── flags ─────────────────────────────────────────────────────────────

    #[test]
    fn accumulate_flag_switches_draw_mode() {
        assert_eq!(config(&["--accumulate"]).draw_mode, DrawMode::Accumulated);
    }

    #[test]
    fn static_flag_selects_indexed_scene() {
        let c = config(&["--static", "v.wgsl", "f.wgsl"]);
        assert_eq!(c.scene, Scene::Static);
        assert_eq!(c.shaders, ShaderSupplier::files("v.wgsl", "f.wgsl"));
    }

    #[test]
    fn accumulate_and_static_conflict() {
        assert!(parse(&["--accumulate", "--static"]).is_err());
    }

    #[test]
    fn help_is_available() {
        let err = parse(&["--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }
}
