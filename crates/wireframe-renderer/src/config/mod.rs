pub mod host;
pub mod settings;

pub use host::HostConfig;
pub use settings::Settings;
