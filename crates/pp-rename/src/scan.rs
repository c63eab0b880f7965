use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Liste les sous-dossiers immédiats de `base`, triés par nom.
///
/// Les entrées qui ne sont pas des dossiers sont ignorées.
///
/// # Errors
/// Retourne une erreur si `base` ne peut être lu.
pub fn list_subdirs(base: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in
        fs::read_dir(base).with_context(|| format!("Impossible de lire {}", base.display()))?
    {
        let path = entry?.path();
        if path.is_dir() {
            dirs.push(path);
        } else {
            log::debug!("Pas un dossier, ignoré : {}", path.display());
        }
    }
    sort_by_file_name(&mut dirs);
    Ok(dirs)
}

/// Lists the files of `folder`, sorted lexically by file name.
///
/// Nested directories are left alone.
///
/// # Errors
/// Returns an error if `folder` cannot be read.
pub fn list_files(folder: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in
        fs::read_dir(folder).with_context(|| format!("Impossible de lire {}", folder.display()))?
    {
        let path = entry?.path();
        if path.is_dir() {
            log::debug!("Sous-dossier imbriqué ignoré : {}", path.display());
        } else {
            files.push(path);
        }
    }
    sort_by_file_name(&mut files);
    Ok(files)
}

// Byte-wise order on the OS string, entries always share a parent here.
fn sort_by_file_name(paths: &mut [PathBuf]) {
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn subdirs_sorted_and_files_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("zinnia")).unwrap();
        fs::create_dir(dir.path().join("aloe")).unwrap();
        fs::create_dir(dir.path().join("Basil")).unwrap();
        fs::write(dir.path().join("notes.txt"), b"x").unwrap();

        let dirs = list_subdirs(dir.path()).unwrap();
        assert_eq!(names(&dirs), ["Basil", "aloe", "zinnia"]);
    }

    #[test]
    fn files_sorted_lexically() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.txt", "a.png", "c.jpg", "10.png", "2.png"] {
            fs::write(dir.path().join(name), name).unwrap();
        }
        fs::create_dir(dir.path().join("nested")).unwrap();

        let files = list_files(dir.path()).unwrap();
        assert_eq!(names(&files), ["10.png", "2.png", "a.png", "b.txt", "c.jpg"]);
    }

    #[test]
    fn missing_base_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(list_subdirs(&dir.path().join("absent")).is_err());
    }
}
