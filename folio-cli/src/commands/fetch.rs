//! Fetch command implementation

use super::{page_error, Context};
use anyhow::Result;

/// Look up a book, cache first, and print it
pub async fn fetch(ctx: &Context, id: &str, json: bool) -> Result<()> {
    let mut controller = ctx.controller()?;

    controller.set_input(id);
    controller.search(&ctx.client()).await;
    page_error(&controller)?;

    let Some(book) = controller.state().book() else {
        anyhow::bail!("No book loaded");
    };

    if json {
        println!("{}", serde_json::to_string_pretty(book)?);
    } else {
        println!("{}", controller.render());
    }

    Ok(())
}
