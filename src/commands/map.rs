//! `ndvi-change map` command.

use std::path::Path;

use crate::context::ServiceContext;
use crate::map::html;
use crate::ndvi::YearSelection;
use crate::workflow::{self, Comparison};

/// Execute the `map` command.
///
/// Builds both composites and their difference, requests tiles for each and
/// writes the page to `output`.
///
/// # Errors
///
/// Returns an error string if a map request fails or the page cannot be written.
pub async fn run(
    ctx: &ServiceContext,
    years: YearSelection,
    output: &Path,
    height: u32,
) -> Result<(), String> {
    let comparison = Comparison::build(years)?;
    let doc = workflow::render_map(ctx, &comparison, height).await?;
    let page = html::render(&doc)?;

    ctx.fs
        .write(output, &page)
        .map_err(|e| format!("Failed to write map to {}: {e}", output.display()))?;

    println!("Map written to {}", output.display());
    Ok(())
}
