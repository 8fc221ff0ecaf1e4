pub mod settings;

pub use settings::{AppConfig, AuthSettings, ClockSettings, RatingSettings, ServerSettings, StorageSettings};
