use std::path::{Path, PathBuf};

use tera::Context;
use tracing::{debug, instrument, trace};

use crate::config::{HostConfig, Settings};
use crate::engine::{EngineFactory, TemplateEngine, TeraFactory};
use crate::error::{RendererError, Result};
use crate::paths::ViewPathProvider;

/// View types registered as engine namespaces when `Settings::namespaces` is set.
const NAMESPACED_TYPES: [&str; 3] = ["layout", "partial", "component"];

/// Renders Wireframe views through a template engine.
///
/// The engine is built once by [`initialize`](Self::initialize) and reused for
/// every render. View paths are fetched from the provider on each call.
pub struct RendererAdapter<P, F = TeraFactory>
where
    F: EngineFactory,
{
    host: HostConfig,
    view_paths: P,
    factory: F,
    engine: Option<F::Engine>,
    cache_dir: Option<PathBuf>,
    ext: String,
}

impl<P: ViewPathProvider> RendererAdapter<P, TeraFactory> {
    pub fn new(host: HostConfig, view_paths: P) -> Self {
        Self::with_factory(host, view_paths, TeraFactory)
    }
}

impl<P, F> RendererAdapter<P, F>
where
    P: ViewPathProvider,
    F: EngineFactory,
{
    /// Name used for the default cache directory under the host cache path.
    pub const NAME: &'static str = "WireframeRendererLatte";

    /// Extension used when the settings do not name one.
    pub const DEFAULT_EXTENSION: &'static str = "latte";

    pub fn with_factory(host: HostConfig, view_paths: P, factory: F) -> Self {
        Self {
            host,
            view_paths,
            factory,
            engine: None,
            cache_dir: None,
            ext: Self::DEFAULT_EXTENSION.to_string(),
        }
    }

    /// Build and configure the engine.
    ///
    /// An explicit `cache` setting wins over the host default; a non-empty
    /// `ext` setting replaces the default extension. Calling this again once
    /// an engine exists leaves the engine untouched.
    #[instrument(skip_all)]
    pub fn initialize(&mut self, settings: &Settings) -> Result<&mut Self> {
        if self.engine.is_some() {
            debug!("renderer already initialized, keeping existing engine");
            return Ok(self);
        }

        let cache_dir = match &settings.cache {
            Some(cache) => cache.clone(),
            None => self.host.cache_dir_for(Self::NAME),
        };

        if let Some(ext) = settings.ext.as_deref().filter(|e| !e.is_empty()) {
            self.ext = ext.to_string();
        }

        let mut engine = self.factory.create(&cache_dir)?;

        if settings.namespaces {
            let paths = self.view_paths.view_paths();
            for name in NAMESPACED_TYPES {
                if let Some(dir) = paths.get(name) {
                    engine.add_namespace(name, Path::new(dir), &self.ext)?;
                }
            }
        }

        debug!(cache_dir = %cache_dir.display(), ext = %self.ext, "initialized renderer");

        self.cache_dir = Some(cache_dir);
        self.engine = Some(engine);
        Ok(self)
    }

    /// Render `view` of the given type with `context`.
    ///
    /// The template reference is the type's base directory followed directly
    /// by `view`. Engine errors are returned as-is.
    pub fn render(&self, view_type: &str, view: &str, context: &Context) -> Result<String> {
        let paths = self.view_paths.view_paths();
        let base_dir = paths
            .get(view_type)
            .ok_or_else(|| RendererError::InvalidViewType {
                view_type: view_type.to_string(),
            })?;

        let engine = self.engine()?;
        let reference = adapt_view(view, base_dir);
        trace!(view_type, reference = %reference, "rendering view");

        engine.render_to_string(&reference, context)
    }

    /// The engine instance, or `NotInitialized` before [`initialize`](Self::initialize).
    pub fn engine(&self) -> Result<&F::Engine> {
        self.engine.as_ref().ok_or(RendererError::NotInitialized)
    }

    pub fn default_extension(&self) -> &str {
        &self.ext
    }

    /// Cache directory the engine was created with, once initialized.
    pub fn cache_dir(&self) -> Option<&Path> {
        self.cache_dir.as_deref()
    }

    pub fn is_initialized(&self) -> bool {
        self.engine.is_some()
    }
}

fn adapt_view(view: &str, base_dir: &str) -> String {
    format!("{base_dir}{view}")
}
