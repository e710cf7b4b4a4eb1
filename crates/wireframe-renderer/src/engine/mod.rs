pub mod tera;

use std::path::Path;

use ::tera::Context;

use crate::error::Result;

pub use self::tera::{TeraEngine, TeraFactory};

/// A template engine the adapter can render through.
pub trait TemplateEngine {
    /// Render the template at `reference` with `context` and return the markup.
    fn render_to_string(&self, reference: &str, context: &Context) -> Result<String>;

    /// Make every `*.<ext>` template under `dir` addressable as `<name>/<relative path>`.
    ///
    /// Engines without namespace support ignore the call.
    fn add_namespace(&mut self, name: &str, dir: &Path, ext: &str) -> Result<()> {
        let _ = (name, dir, ext);
        Ok(())
    }
}

/// Builds the engine instance during adapter initialization.
///
/// Swap the factory to change how the engine is constructed or configured.
pub trait EngineFactory {
    type Engine: TemplateEngine;

    fn create(&self, cache_dir: &Path) -> Result<Self::Engine>;
}
