//! Renderer adapter for Wireframe views.
//!
//! [`RendererAdapter`] resolves a view request (type and name) against the
//! directories supplied by a [`ViewPathProvider`] and hands the resulting
//! template reference to a [`TemplateEngine`], Tera by default.

pub mod adapter;
pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod paths;

pub use adapter::RendererAdapter;
pub use config::{HostConfig, Settings};
pub use context::build_context;
pub use engine::{EngineFactory, TemplateEngine, TeraEngine, TeraFactory};
pub use error::{RendererError, Result};
pub use paths::{ViewPathProvider, ViewPaths};

pub use tera::{Context, Value};
