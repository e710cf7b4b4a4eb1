use std::collections::BTreeMap;
use std::path::{Path, MAIN_SEPARATOR};
use std::rc::Rc;

/// Conventional Wireframe view types and the directories they live in.
pub const WIREFRAME_DIRS: [(&str, &str); 4] = [
    ("view", "views"),
    ("layout", "layouts"),
    ("partial", "partials"),
    ("component", "components"),
];

/// Mapping from a view type (`view`, `layout`, ...) to its base directory.
///
/// Base directories are kept as strings: template references are built by
/// appending the view name to them verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewPaths(BTreeMap<String, String>);

impl ViewPaths {
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard Wireframe layout under `root`: `views/`, `layouts/`,
    /// `partials/` and `components/`, each with a trailing separator.
    pub fn wireframe(root: &Path) -> Self {
        WIREFRAME_DIRS
            .iter()
            .map(|(view_type, dir)| {
                let base = root.join(dir);
                (
                    view_type.to_string(),
                    format!("{}{}", base.display(), MAIN_SEPARATOR),
                )
            })
            .collect()
    }

    pub fn with(mut self, view_type: impl Into<String>, base_dir: impl Into<String>) -> Self {
        self.insert(view_type, base_dir);
        self
    }

    pub fn insert(&mut self, view_type: impl Into<String>, base_dir: impl Into<String>) {
        self.0.insert(view_type.into(), base_dir.into());
    }

    pub fn get(&self, view_type: &str) -> Option<&str> {
        self.0.get(view_type).map(String::as_str)
    }

    pub fn contains(&self, view_type: &str) -> bool {
        self.0.contains_key(view_type)
    }
}

impl<K, V> FromIterator<(K, V)> for ViewPaths
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Supplies the current view path map. Queried on every render.
pub trait ViewPathProvider {
    fn view_paths(&self) -> ViewPaths;
}

impl ViewPathProvider for ViewPaths {
    fn view_paths(&self) -> ViewPaths {
        self.clone()
    }
}

impl<T: ViewPathProvider + ?Sized> ViewPathProvider for &T {
    fn view_paths(&self) -> ViewPaths {
        (**self).view_paths()
    }
}

impl<T: ViewPathProvider + ?Sized> ViewPathProvider for Rc<T> {
    fn view_paths(&self) -> ViewPaths {
        (**self).view_paths()
    }
}
