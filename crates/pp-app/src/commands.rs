use anyhow::Result;
use pp_core::config::{RenameConfig, StripConfig};
use pp_strip::StripOutcome;

/// Exécute le renommage et affiche une ligne par fichier.
///
/// # Errors
/// Propagates any filesystem error from the renamer.
pub fn run_rename(config: &RenameConfig) -> Result<()> {
    let verb = if config.dry_run {
        "Would rename"
    } else {
        "Renamed"
    };
    pp_rename::rename_files_in_folders(config, |op| {
        println!("{verb}: {} -> {}", op.from.display(), op.to.display());
    })?;
    Ok(())
}

/// Exécute le détourage et affiche une ligne par index.
///
/// # Errors
/// Propagates decode, write and empty-image (`fail` policy) errors.
pub fn run_strip(config: &StripConfig) -> Result<()> {
    pp_strip::strip_backgrounds(config, |outcome| println!("{}", describe(outcome)))?;
    Ok(())
}

fn describe(outcome: &StripOutcome) -> String {
    match outcome {
        StripOutcome::Processed { input, output, .. } => {
            format!("Processed {} -> {}", input.display(), output.display())
        }
        StripOutcome::Skipped { input } => {
            format!("File {} not found. Skipping.", input.display())
        }
        StripOutcome::Empty { input } => {
            format!("No content left in {}. Skipping.", input.display())
        }
    }
}
