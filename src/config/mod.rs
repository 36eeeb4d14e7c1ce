//! Configuration loaded from `.secretvault.toml`.

pub mod settings;

pub use settings::Settings;
