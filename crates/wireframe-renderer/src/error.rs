#![allow(unused_assignments)]

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum RendererError {
    #[error("Unexpected type ({view_type}).")]
    #[diagnostic(help("Use one of the view types returned by the view path provider"))]
    InvalidViewType { view_type: String },

    #[error("Template engine has not been initialized")]
    #[diagnostic(help("Call `initialize` on the renderer before rendering"))]
    NotInitialized,

    #[error(transparent)]
    #[diagnostic(help("Check your template syntax"))]
    Engine(#[from] tera::Error),

    #[error("Failed to read template {path}")]
    TemplateRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Renderer settings not found at {path}")]
    SettingsNotFound { path: PathBuf },

    #[error("Failed to parse renderer settings")]
    #[diagnostic(help("Check the TOML syntax in your settings file"))]
    SettingsParse {
        #[source]
        source: toml::de::Error,
    },

    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, RendererError>;
