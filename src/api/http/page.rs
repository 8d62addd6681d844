// src/api/http/page.rs
// The browser form served at / and /index.html

use std::borrow::Cow;
use std::path::PathBuf;

/// Built-in copy of the page
pub const EMBEDDED_PAGE: &str = include_str!("../../../static/index.html");

#[derive(Debug, Clone, Default)]
pub enum PageSource {
    #[default]
    Embedded,
    /// Re-read on every request so edits show up without a restart
    File(PathBuf),
}

impl PageSource {
    pub fn from_path(path: Option<PathBuf>) -> Self {
        path.map(PageSource::File).unwrap_or_default()
    }

    pub async fn load(&self) -> std::io::Result<Cow<'static, str>> {
        match self {
            PageSource::Embedded => Ok(Cow::Borrowed(EMBEDDED_PAGE)),
            PageSource::File(path) => tokio::fs::read_to_string(path).await.map(Cow::Owned),
        }
    }
}
