/// Folder renamer: renumbers the files of every subfolder to `1.png`, `2.png`, …

pub mod plan;
pub mod scan;

use anyhow::Result;
use pp_core::config::RenameConfig;

pub use plan::{FolderPlan, RenameOp, apply_plan, plan_folder};
pub use scan::{list_files, list_subdirs};

/// Résultat d'un passage complet sur le dossier de base.
#[derive(Debug, Default)]
pub struct RenameReport {
    /// Sous-dossiers visités.
    pub folders: usize,
    /// Renommages effectués (ou prévus en dry-run), dans l'ordre.
    pub ops: Vec<RenameOp>,
}

/// Renumérote chaque sous-dossier immédiat de `config.base_dir`.
///
/// Les sous-dossiers sont traités par ordre lexical. Chaque plan est calculé
/// entièrement avant d'être appliqué. En `dry_run`, rien n'est modifié et
/// `on_rename` reçoit les renommages prévus.
///
/// # Errors
/// Any filesystem error aborts the run.
///
/// # Example
/// ```no_run
/// use pp_core::config::RenameConfig;
/// use pp_rename::rename_files_in_folders;
///
/// let report = rename_files_in_folders(&RenameConfig::default(), |op| {
///     println!("Renamed: {} -> {}", op.from.display(), op.to.display());
/// })
/// .unwrap();
/// println!("{} fichiers", report.ops.len());
/// ```
pub fn rename_files_in_folders(
    config: &RenameConfig,
    mut on_rename: impl FnMut(&RenameOp),
) -> Result<RenameReport> {
    let mut report = RenameReport::default();

    for folder in list_subdirs(&config.base_dir)? {
        let plan = plan_folder(&folder, &config.extension)?;
        report.folders += 1;

        if config.dry_run {
            for op in plan.pending() {
                on_rename(op);
                report.ops.push(op.clone());
            }
        } else {
            let done = apply_plan(&plan, &mut on_rename)?;
            report.ops.extend(done);
        }
    }

    log::info!(
        "{} renommage(s) dans {} dossier(s) sous {}",
        report.ops.len(),
        report.folders,
        config.base_dir.display()
    );
    Ok(report)
}
