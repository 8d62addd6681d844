// src/lib.rs

pub mod api;
pub mod config;
pub mod convert;
pub mod oracle;
pub mod state;

pub use config::AppConfig;
pub use convert::{ConversionRequest, ConversionResult, Direction, Dispatcher, Mode};
pub use state::AppState;
