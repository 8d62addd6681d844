// src/api/http/mod.rs

pub mod handlers;
pub mod page;
pub mod router;

pub use page::{EMBEDDED_PAGE, PageSource};
pub use router::{CONVERT_MAX_BODY_BYTES, create_router, run};
