use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{RendererError, Result};

/// Options passed to [`RendererAdapter::initialize`](crate::RendererAdapter::initialize).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Directory for engine state. Falls back to the host cache path plus the adapter name.
    #[serde(default)]
    pub cache: Option<PathBuf>,

    /// Default template file extension. Empty values are treated as unset.
    #[serde(default)]
    pub ext: Option<String>,

    /// Register the `layout`, `partial` and `component` directories as engine namespaces.
    #[serde(default)]
    pub namespaces: bool,
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(RendererError::SettingsNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| RendererError::Io {
            context: format!("reading {}", path.display()),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| RendererError::SettingsParse { source: e })
    }

    pub fn with_cache(mut self, cache: impl Into<PathBuf>) -> Self {
        self.cache = Some(cache.into());
        self
    }

    pub fn with_ext(mut self, ext: impl Into<String>) -> Self {
        self.ext = Some(ext.into());
        self
    }

    pub fn with_namespaces(mut self, enabled: bool) -> Self {
        self.namespaces = enabled;
        self
    }
}
