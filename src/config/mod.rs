pub mod settings;

pub use settings::{ApiKeyKind, LoggingConfig, Settings};
