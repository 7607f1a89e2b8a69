//! Summarize command implementation

use super::{page_error, Context};
use anyhow::Result;

/// Load a book and print its generated analysis
pub async fn summarize(ctx: &Context, id: &str) -> Result<()> {
    let mut controller = ctx.controller()?;
    let client = ctx.client();

    controller.set_input(id);
    controller.search(&client).await;
    page_error(&controller)?;

    controller.request_summary(&client).await;
    page_error(&controller)?;

    match controller.state().summary() {
        Some(analysis) => println!("{}", analysis),
        None => anyhow::bail!("No analysis was produced"),
    }

    Ok(())
}
