//! `ndvi-change export` command.

use crate::context::ServiceContext;
use crate::ndvi::YearSelection;
use crate::workflow::{self, Comparison, EXPORT_CONFIRMATION};

/// Execute the `export` command.
///
/// Submits the change layer to Drive and prints the confirmation once the
/// job is accepted.
///
/// # Errors
///
/// Returns an error string if the submission fails.
pub async fn run(ctx: &ServiceContext, years: YearSelection) -> Result<(), String> {
    let comparison = Comparison::build(years)?;
    let ticket = workflow::export_change(ctx, &comparison).await?;

    println!("{EXPORT_CONFIRMATION}");
    println!("Task: {} ({})", comparison.export_name(), ticket.operation);
    Ok(())
}
