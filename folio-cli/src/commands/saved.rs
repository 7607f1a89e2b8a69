//! Saved-book listing and clearing

use super::Context;
use anyhow::{Context as _, Result};
use folio_core::controller::render_saved;
use folio_core::BookCache;

/// List saved books
pub fn saved(ctx: &Context, json: bool) -> Result<()> {
    let cache = ctx.open_cache()?;

    if json {
        println!("{}", serde_json::to_string_pretty(cache.list())?);
    } else {
        println!("{}", render_saved(cache.list()));
    }

    Ok(())
}

/// Remove all saved books
pub fn clear(ctx: &Context) -> Result<()> {
    let mut cache = ctx.open_cache()?;
    let count = cache.list().len();

    cache.clear().context("Failed to clear saved books")?;

    tracing::info!("Removed {} saved book(s)", count);
    println!("Cleared {} saved book(s)", count);
    Ok(())
}
