//! `trackline steps` - print and validate the canonical step table.

use std::io::Write;

use trackline_core::timeline::StepTable;

use crate::error::Result;

/// Validate the table and list its steps with their positions.
///
/// # Errors
///
/// Returns an error if the table is invalid or the output cannot be written.
pub fn run(table: &StepTable, out: &mut impl Write) -> Result<()> {
    table.validate()?;

    for (index, step) in table.steps().iter().enumerate() {
        writeln!(out, "{index}  {:<20} {}", step.key.as_str(), step.label)?;
    }

    tracing::info!(steps = table.len(), "Step table is valid");
    Ok(())
}
