//! CLI command implementations

mod browse;
mod fetch;
mod saved;
mod summarize;

pub use browse::browse;
pub use fetch::fetch;
pub use saved::{clear, saved};
pub use summarize::summarize;

use anyhow::{Context as _, Result};
use folio_core::{FileCache, RemoteClient, ViewController};
use std::path::PathBuf;

/// Settings shared by every command
pub struct Context {
    pub server: String,
    pub cache: PathBuf,
}

impl Context {
    pub fn open_cache(&self) -> Result<FileCache> {
        FileCache::open(&self.cache)
            .with_context(|| format!("Failed to open cache file {}", self.cache.display()))
    }

    pub fn controller(&self) -> Result<ViewController<FileCache>> {
        Ok(ViewController::new(self.open_cache()?))
    }

    pub fn client(&self) -> RemoteClient {
        RemoteClient::new(&self.server)
    }
}

/// Turn an error page into a command failure
fn page_error<C: folio_core::BookCache>(controller: &ViewController<C>) -> Result<()> {
    match controller.state().failure() {
        Some(failure) => anyhow::bail!("{} ({})", failure.message, failure.kind),
        None => Ok(()),
    }
}
