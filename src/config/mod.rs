//! Configuration module — `.argonbox.toml` loading.

pub mod settings;

pub use settings::Settings;
