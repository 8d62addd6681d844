// src/api/mod.rs

pub mod error;
pub mod http;
pub mod types;

pub use error::{ApiError, ApiResult};
pub use http::{create_router, run};
pub use types::{ConvertResponse, StatusResponse};
