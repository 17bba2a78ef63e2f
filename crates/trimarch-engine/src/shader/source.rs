use std::fmt;
use std::path::{Path, PathBuf};

const BUILTIN_VERTEX: &str = include_str!("builtin/triangle.vert.wgsl");
const BUILTIN_FRAGMENT: &str = include_str!("builtin/triangle.frag.wgsl");

/// Error returned when a shader source file cannot be read.
#[derive(Debug)]
pub struct SourceError {
    pub path: PathBuf,
    pub source: std::io::Error,
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to load shader source {}: {}", self.path.display(), self.source)
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Vertex and fragment WGSL text, ready to compile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSources {
    pub vertex: String,
    pub fragment: String,
}

/// Where shader text comes from.
///
/// Both variants produce the same [`ShaderSources`], so callers (and tests)
/// can swap file-based sources for literals without touching setup code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShaderSupplier {
    Embedded {
        vertex: &'static str,
        fragment: &'static str,
    },
    Files {
        vertex: PathBuf,
        fragment: PathBuf,
    },
}

impl ShaderSupplier {
    /// The pass-through color shaders compiled into the crate.
    pub fn builtin() -> Self {
        ShaderSupplier::Embedded {
            vertex: BUILTIN_VERTEX,
            fragment: BUILTIN_FRAGMENT,
        }
    }

    pub fn files(vertex: impl Into<PathBuf>, fragment: impl Into<PathBuf>) -> Self {
        ShaderSupplier::Files {
            vertex: vertex.into(),
            fragment: fragment.into(),
        }
    }

    /// Produces both sources. Any unreadable file fails the whole load.
    pub fn load(&self) -> Result<ShaderSources, SourceError> {
        let sources = match self {
            ShaderSupplier::Embedded { vertex, fragment } => ShaderSources {
                vertex: (*vertex).to_owned(),
                fragment: (*fragment).to_owned(),
            },
            ShaderSupplier::Files { vertex, fragment } => ShaderSources {
                vertex: read_source(vertex)?,
                fragment: read_source(fragment)?,
            },
        };

        log::debug!("vertex shader source:\n{}", sources.vertex);
        log::debug!("fragment shader source:\n{}", sources.fragment);
        Ok(sources)
    }
}

impl Default for ShaderSupplier {
    fn default() -> Self {
        Self::builtin()
    }
}

fn read_source(path: &Path) -> Result<String, SourceError> {
    std::fs::read_to_string(path).map_err(|source| SourceError {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("trimarch-{name}-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn builtin_sources_are_non_empty() {
        let s = ShaderSupplier::builtin().load().unwrap();
        assert!(s.vertex.contains("@vertex"));
        assert!(s.fragment.contains("@fragment"));
    }

    #[test]
    fn embedded_literals_pass_through() {
        let s = ShaderSupplier::Embedded { vertex: "vs", fragment: "fs" }.load().unwrap();
        assert_eq!(s, ShaderSources { vertex: "vs".into(), fragment: "fs".into() });
    }

    #[test]
    fn files_are_read_verbatim() {
        let dir = scratch_dir("read");
        let vs = dir.join("a.vert.wgsl");
        let fs = dir.join("a.frag.wgsl");
        std::fs::write(&vs, "vertex text").unwrap();
        std::fs::write(&fs, "fragment text").unwrap();

        let s = ShaderSupplier::files(&vs, &fs).load().unwrap();
        assert_eq!(s.vertex, "vertex text");
        assert_eq!(s.fragment, "fragment text");

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = scratch_dir("missing");
        let vs = dir.join("present.wgsl");
        std::fs::write(&vs, "x").unwrap();
        let fs = dir.join("absent.wgsl");

        let err = ShaderSupplier::files(&vs, &fs).load().unwrap_err();
        assert_eq!(err.path, fs);
        assert_eq!(err.source.kind(), std::io::ErrorKind::NotFound);
        assert!(err.to_string().contains("absent.wgsl"));

        std::fs::remove_dir_all(dir).unwrap();
    }
}
