use std::ffi::OsString;
use std::path::{PathBuf, MAIN_SEPARATOR};

use crate::error::{RendererError, Result};

/// Host-side configuration the adapter depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    /// Base cache directory owned by the host. Adapter cache paths are formed by
    /// appending the adapter name to this value verbatim, so it normally ends
    /// with a path separator.
    pub cache_path: PathBuf,
}

impl HostConfig {
    pub fn new(cache_path: impl Into<PathBuf>) -> Self {
        Self {
            cache_path: cache_path.into(),
        }
    }

    /// Resolve the host cache path from the environment.
    ///
    /// Checks `WIREFRAME_CACHE_DIR` first, then falls back to
    /// `~/.cache/wireframe/`. An empty variable counts as unset. The returned
    /// path always ends with a separator.
    pub fn from_env() -> Result<Self> {
        let base = resolve_cache_base(std::env::var_os("WIREFRAME_CACHE_DIR"))?;
        Ok(Self::new(with_trailing_separator(base)))
    }

    /// Cache directory for a named adapter: the host cache path with `name` appended.
    pub fn cache_dir_for(&self, name: &str) -> PathBuf {
        let mut joined: OsString = self.cache_path.clone().into_os_string();
        joined.push(name);
        PathBuf::from(joined)
    }
}

fn resolve_cache_base(configured: Option<OsString>) -> Result<PathBuf> {
    match configured.filter(|dir| !dir.is_empty()) {
        Some(dir) => Ok(PathBuf::from(dir)),
        None => dirs::cache_dir()
            .map(|d| d.join("wireframe"))
            .ok_or_else(|| RendererError::Io {
                context: "unable to determine cache directory: set WIREFRAME_CACHE_DIR or ensure a home directory exists".into(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no cache directory available"),
            }),
    }
}

fn with_trailing_separator(path: PathBuf) -> PathBuf {
    let mut raw = path.into_os_string();
    if !raw.to_string_lossy().ends_with(MAIN_SEPARATOR) {
        raw.push(MAIN_SEPARATOR.to_string());
    }
    PathBuf::from(raw)
}
