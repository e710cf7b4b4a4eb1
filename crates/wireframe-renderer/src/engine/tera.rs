use std::cell::RefCell;
use std::collections::HashMap;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tera::{Context, Tera};
use tracing::{debug, instrument};
use walkdir::WalkDir;

use crate::engine::{EngineFactory, TemplateEngine};
use crate::error::{RendererError, Result};

/// Suffixes rendered with HTML autoescaping.
const AUTOESCAPE_SUFFIXES: [&str; 4] = [".latte", ".html", ".htm", ".xml"];

/// Creates [`TeraEngine`] instances.
#[derive(Debug, Clone, Copy, Default)]
pub struct TeraFactory;

impl EngineFactory for TeraFactory {
    type Engine = TeraEngine;

    fn create(&self, cache_dir: &Path) -> Result<TeraEngine> {
        TeraEngine::new(cache_dir)
    }
}

/// Tera-backed engine that loads templates straight from the filesystem.
///
/// Each view is compiled on first use on top of the registered namespaces and
/// kept until the file's modification time changes.
pub struct TeraEngine {
    cache_dir: PathBuf,
    base: Tera,
    compiled: RefCell<HashMap<String, Compiled>>,
}

struct Compiled {
    modified: Option<SystemTime>,
    tera: Tera,
}

impl TeraEngine {
    /// Create an engine whose state lives in `cache_dir`, creating the directory if needed.
    pub fn new(cache_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(cache_dir).map_err(|e| RendererError::Io {
            context: format!("creating cache directory {}", cache_dir.display()),
            source: e,
        })?;

        let mut base = Tera::default();
        base.autoescape_on(AUTOESCAPE_SUFFIXES.to_vec());

        debug!(cache_dir = %cache_dir.display(), "created tera engine");

        Ok(Self {
            cache_dir: cache_dir.to_path_buf(),
            base,
            compiled: RefCell::new(HashMap::new()),
        })
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Names of the namespaced templates, sorted.
    pub fn template_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.base.get_template_names().map(str::to_string).collect();
        names.sort();
        names
    }

    fn ensure_compiled(&self, reference: &str) -> Result<()> {
        let path = Path::new(reference);
        let read_err = |e: std::io::Error| RendererError::TemplateRead {
            path: path.to_path_buf(),
            source: e,
        };

        let modified = std::fs::metadata(path).map_err(read_err)?.modified().ok();
        let fresh = modified.is_some()
            && self
                .compiled
                .borrow()
                .get(reference)
                .is_some_and(|c| c.modified == modified);
        if fresh {
            return Ok(());
        }

        let content = std::fs::read_to_string(path).map_err(read_err)?;
        let mut tera = self.base.clone();
        tera.add_raw_template(reference, &content)?;
        self.compiled
            .borrow_mut()
            .insert(reference.to_string(), Compiled { modified, tera });

        debug!(template = reference, "compiled template");
        Ok(())
    }
}

impl TemplateEngine for TeraEngine {
    #[instrument(skip(self, context))]
    fn render_to_string(&self, reference: &str, context: &Context) -> Result<String> {
        self.ensure_compiled(reference)?;
        let compiled = self.compiled.borrow();
        match compiled.get(reference) {
            Some(entry) => Ok(entry.tera.render(reference, context)?),
            None => Err(tera::Error::template_not_found(reference).into()),
        }
    }

    fn add_namespace(&mut self, name: &str, dir: &Path, ext: &str) -> Result<()> {
        if !dir.is_dir() {
            debug!(namespace = name, dir = %dir.display(), "namespace directory missing, skipping");
            return Ok(());
        }

        let mut templates = Vec::new();
        for entry in WalkDir::new(dir)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| e.path().extension() == Some(OsStr::new(ext)))
        {
            let Ok(rel_path) = entry.path().strip_prefix(dir) else {
                continue;
            };
            let rel = rel_path
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");

            let content =
                std::fs::read_to_string(entry.path()).map_err(|e| RendererError::TemplateRead {
                    path: entry.path().to_path_buf(),
                    source: e,
                })?;
            templates.push((format!("{name}/{rel}"), content));
        }

        debug!(namespace = name, count = templates.len(), "registered namespace");
        self.base.add_raw_templates(templates)?;
        self.compiled.get_mut().clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, rel: &str, content: &str) -> String {
        let path = dir.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, content).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn new_creates_cache_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let cache = tmp.path().join("nested").join("cache");
        let engine = TeraEngine::new(&cache).unwrap();
        assert!(cache.is_dir());
        assert_eq!(engine.cache_dir(), cache.as_path());
    }

    #[test]
    fn renders_file_by_path() {
        let tmp = tempfile::tempdir().unwrap();
        let reference = write(tmp.path(), "views/home.latte", "<h1>{{ title }}</h1>");
        let engine = TeraEngine::new(&tmp.path().join("cache")).unwrap();

        let mut context = Context::new();
        context.insert("title", "Hi");
        let output = engine.render_to_string(&reference, &context).unwrap();
        assert_eq!(output, "<h1>Hi</h1>");
    }

    #[test]
    fn escapes_html_in_latte_templates() {
        let tmp = tempfile::tempdir().unwrap();
        let reference = write(tmp.path(), "views/x.latte", "{{ body }}");
        let engine = TeraEngine::new(&tmp.path().join("cache")).unwrap();

        let mut context = Context::new();
        context.insert("body", "<b>");
        let output = engine.render_to_string(&reference, &context).unwrap();
        assert_eq!(output, "&lt;b&gt;");
    }

    #[test]
    fn missing_template_is_read_error() {
        let tmp = tempfile::tempdir().unwrap();
        let engine = TeraEngine::new(&tmp.path().join("cache")).unwrap();
        let missing = tmp.path().join("nope.latte");

        let result = engine.render_to_string(&missing.to_string_lossy(), &Context::new());
        assert!(matches!(result, Err(RendererError::TemplateRead { .. })));
    }

    #[test]
    fn syntax_error_is_engine_error() {
        let tmp = tempfile::tempdir().unwrap();
        let reference = write(tmp.path(), "bad.latte", "{% if %}");
        let engine = TeraEngine::new(&tmp.path().join("cache")).unwrap();

        let result = engine.render_to_string(&reference, &Context::new());
        assert!(matches!(result, Err(RendererError::Engine(_))));
    }

    #[test]
    fn failed_compile_does_not_affect_other_views() {
        let tmp = tempfile::tempdir().unwrap();
        let orphan = write(tmp.path(), "orphan.latte", r#"{% extends "layout/none.latte" %}"#);
        let good = write(tmp.path(), "good.latte", "ok");
        let engine = TeraEngine::new(&tmp.path().join("cache")).unwrap();

        assert!(engine.render_to_string(&orphan, &Context::new()).is_err());
        assert_eq!(engine.render_to_string(&good, &Context::new()).unwrap(), "ok");
    }

    #[test]
    fn recompiles_after_file_changes() {
        let tmp = tempfile::tempdir().unwrap();
        let reference = write(tmp.path(), "page.latte", "one");
        let engine = TeraEngine::new(&tmp.path().join("cache")).unwrap();
        assert_eq!(engine.render_to_string(&reference, &Context::new()).unwrap(), "one");

        std::fs::write(&reference, "two").unwrap();
        let file = std::fs::File::options().write(true).open(&reference).unwrap();
        file.set_modified(SystemTime::now() + std::time::Duration::from_secs(10))
            .unwrap();

        assert_eq!(engine.render_to_string(&reference, &Context::new()).unwrap(), "two");
    }

    #[test]
    fn namespace_templates_are_extendable() {
        let tmp = tempfile::tempdir().unwrap();
        write(
            tmp.path(),
            "layouts/base.latte",
            "<main>{% block content %}{% endblock %}</main>",
        );
        write(tmp.path(), "partials/nav/top.latte", "<nav/>");
        let reference = write(
            tmp.path(),
            "views/home.latte",
            r#"{% extends "layout/base.latte" %}{% block content %}{% include "partial/nav/top.latte" %}{% endblock %}"#,
        );

        let mut engine = TeraEngine::new(&tmp.path().join("cache")).unwrap();
        engine
            .add_namespace("layout", &tmp.path().join("layouts"), "latte")
            .unwrap();
        engine
            .add_namespace("partial", &tmp.path().join("partials"), "latte")
            .unwrap();
        assert_eq!(
            engine.template_names(),
            vec!["layout/base.latte", "partial/nav/top.latte"]
        );

        let output = engine.render_to_string(&reference, &Context::new()).unwrap();
        assert_eq!(output, "<main><nav/></main>");
    }

    #[test]
    fn namespace_skips_files_with_other_extensions() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "partials/menu.latte", "<nav/>");
        write(tmp.path(), "partials/legacy.php", "<?php echo 1;");
        let png = tmp.path().join("partials").join("thumb.png");
        std::fs::write(&png, [0x89, b'P', b'N', b'G', 0xff]).unwrap();

        let mut engine = TeraEngine::new(&tmp.path().join("cache")).unwrap();
        engine
            .add_namespace("partial", &tmp.path().join("partials"), "latte")
            .unwrap();
        assert_eq!(engine.template_names(), vec!["partial/menu.latte"]);
    }

    #[test]
    fn missing_namespace_directory_is_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        let mut engine = TeraEngine::new(&tmp.path().join("cache")).unwrap();
        engine
            .add_namespace("component", &tmp.path().join("components"), "latte")
            .unwrap();
        assert!(engine.template_names().is_empty());
    }
}
