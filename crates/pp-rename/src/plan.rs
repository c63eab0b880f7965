use std::collections::HashSet;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use crate::scan::list_files;

/// Un renommage planifié.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenameOp {
    /// Chemin d'origine.
    pub from: PathBuf,
    /// Chemin cible `{index}.{extension}`.
    pub to: PathBuf,
}

impl RenameOp {
    /// `true` si le fichier porte déjà son nom cible.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.from == self.to
    }
}

/// Full mapping for one folder, computed before anything is renamed.
#[derive(Clone, Debug)]
pub struct FolderPlan {
    /// Folder the plan applies to.
    pub folder: PathBuf,
    /// One op per file, in lexical order of the original names.
    pub ops: Vec<RenameOp>,
}

impl FolderPlan {
    /// Ops that actually move a file.
    pub fn pending(&self) -> impl Iterator<Item = &RenameOp> {
        self.ops.iter().filter(|op| !op.is_noop())
    }
}

/// Calcule le plan complet `trié[i] -> {i+1}.{extension}` pour `folder`.
///
/// # Errors
/// Retourne une erreur si le dossier ne peut être lu.
pub fn plan_folder(folder: &Path, extension: &str) -> Result<FolderPlan> {
    let ops = list_files(folder)?
        .into_iter()
        .enumerate()
        .map(|(i, from)| RenameOp {
            to: folder.join(format!("{}.{extension}", i + 1)),
            from,
        })
        .collect();
    Ok(FolderPlan {
        folder: folder.to_path_buf(),
        ops,
    })
}

/// Applique un plan en deux phases : chaque fichier à déplacer passe d'abord
/// par un nom temporaire unique, puis rejoint sa cible. Aucun original encore
/// non traité ne peut être écrasé.
///
/// Avant tout déplacement, le plan est refusé si une cible est occupée par
/// une entrée hors plan (un sous-dossier imbriqué, par exemple). En cas
/// d'échec en cours de route, les déplacements déjà faits sont annulés.
///
/// `on_rename` est appelé pour chaque renommage une fois le dossier terminé.
///
/// # Errors
/// Returns an error if a target is taken by an entry outside the plan, or the
/// first filesystem error after rolling the folder back to its original names.
pub fn apply_plan(
    plan: &FolderPlan,
    mut on_rename: impl FnMut(&RenameOp),
) -> Result<Vec<RenameOp>> {
    let pending: Vec<&RenameOp> = plan.pending().collect();
    if pending.is_empty() {
        log::debug!("Rien à renommer dans {}", plan.folder.display());
        return Ok(Vec::new());
    }

    let mut taken = existing_names(&plan.folder)?;
    check_targets(plan, &pending, &taken)?;

    let mut journal: Vec<(PathBuf, PathBuf)> = Vec::with_capacity(pending.len() * 2);
    let mut staged = Vec::with_capacity(pending.len());

    // Phase 1
    for (i, op) in pending.iter().enumerate() {
        let tmp = plan.folder.join(temp_name(i, &mut taken));
        if let Err(e) = move_entry(&op.from, &tmp, &mut journal) {
            roll_back(&journal);
            return Err(e);
        }
        staged.push(tmp);
    }

    // Phase 2
    for (tmp, op) in staged.iter().zip(&pending) {
        if let Err(e) = move_entry(tmp, &op.to, &mut journal) {
            roll_back(&journal);
            return Err(e).with_context(|| format!("original : {}", op.from.display()));
        }
    }

    let done: Vec<RenameOp> = pending.into_iter().cloned().collect();
    for op in &done {
        on_rename(op);
    }
    Ok(done)
}

fn check_targets(
    plan: &FolderPlan,
    pending: &[&RenameOp],
    existing: &HashSet<OsString>,
) -> Result<()> {
    let planned: HashSet<&OsStr> = plan
        .ops
        .iter()
        .filter_map(|op| op.from.file_name())
        .collect();
    for op in pending {
        if let Some(name) = op.to.file_name() {
            if existing.contains(name) && !planned.contains(name) {
                bail!(
                    "{} existe déjà et n'est pas un fichier du plan, rien n'a été renommé",
                    op.to.display()
                );
            }
        }
    }
    Ok(())
}

fn move_entry(from: &Path, to: &Path, journal: &mut Vec<(PathBuf, PathBuf)>) -> Result<()> {
    fs::rename(from, to)
        .with_context(|| format!("Impossible de renommer {} -> {}", from.display(), to.display()))?;
    log::debug!("{} -> {}", from.display(), to.display());
    journal.push((from.to_path_buf(), to.to_path_buf()));
    Ok(())
}

// Undo in reverse order; each reversed move targets a name freed by a later one.
fn roll_back(journal: &[(PathBuf, PathBuf)]) {
    for (from, to) in journal.iter().rev() {
        if let Err(e) = fs::rename(to, from) {
            log::error!(
                "Annulation impossible {} -> {} : {e}",
                to.display(),
                from.display()
            );
        }
    }
    log::warn!("{} déplacement(s) annulé(s)", journal.len());
}

fn existing_names(folder: &Path) -> Result<HashSet<OsString>> {
    let mut names = HashSet::new();
    for entry in
        fs::read_dir(folder).with_context(|| format!("Impossible de lire {}", folder.display()))?
    {
        names.insert(entry?.file_name());
    }
    Ok(names)
}

fn temp_name(i: usize, taken: &mut HashSet<OsString>) -> OsString {
    let mut candidate = OsString::from(format!(".plantprep-{i}.tmp"));
    let mut attempt = 0u32;
    while taken.contains(&candidate) {
        attempt += 1;
        candidate = OsString::from(format!(".plantprep-{i}-{attempt}.tmp"));
    }
    taken.insert(candidate.clone());
    candidate
}
