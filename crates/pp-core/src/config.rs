use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Fichier de configuration cherché dans le répertoire courant si `--config` est absent.
pub const DEFAULT_CONFIG_FILE: &str = "plantprep.toml";

/// Configuration complète des deux outils.
///
/// Sérialisable en TOML. Chaque champ a une valeur par défaut qui reproduit
/// le comportement historique (base `.`, `Img1.jpg`..`Img9.jpg`, sortie `./processed_images`).
///
/// # Example
/// ```
/// use pp_core::config::PrepConfig;
/// let config = PrepConfig::default();
/// assert_eq!(config.strip.first, 1);
/// assert_eq!(config.strip.last, 9);
/// ```
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct PrepConfig {
    /// Folder Renamer settings.
    pub rename: RenameConfig,
    /// Background Stripper settings.
    pub strip: StripConfig,
}

/// Paramètres du renommage par sous-dossier.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct RenameConfig {
    /// Dossier de base dont les sous-dossiers immédiats sont renumérotés.
    pub base_dir: PathBuf,
    /// Extension forcée des fichiers renommés, sans point.
    pub extension: String,
    /// Calcule le plan sans toucher au disque.
    #[serde(skip)]
    pub dry_run: bool,
}

impl Default for RenameConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            extension: "png".into(),
            dry_run: false,
        }
    }
}

/// Policy when keying leaves no visible pixel in an image.
///
/// # Example
/// ```
/// use pp_core::config::EmptyPolicy;
/// assert_eq!(EmptyPolicy::default(), EmptyPolicy::Skip);
/// ```
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EmptyPolicy {
    /// Warn, write nothing, continue with the next index.
    #[default]
    Skip,
    /// Abort the run with an explicit error.
    Fail,
}

/// Paramètres du détourage des fonds blancs.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct StripConfig {
    /// Dossier contenant `{prefix}{i}.{input_ext}`.
    pub input_dir: PathBuf,
    /// Dossier de sortie, créé si absent.
    pub output_dir: PathBuf,
    /// Préfixe commun des noms de fichiers.
    pub prefix: String,
    /// Extension des fichiers d'entrée, sans point.
    pub input_ext: String,
    /// Premier index (inclus).
    pub first: u32,
    /// Dernier index (inclus).
    pub last: u32,
    /// Comportement pour une image entièrement blanche.
    pub on_empty: EmptyPolicy,
}

impl Default for StripConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            output_dir: PathBuf::from("./processed_images"),
            prefix: "Img".into(),
            input_ext: "jpg".into(),
            first: 1,
            last: 9,
            on_empty: EmptyPolicy::Skip,
        }
    }
}

impl StripConfig {
    /// Chemin d'entrée pour l'index `i`.
    #[must_use]
    pub fn input_path(&self, i: u32) -> PathBuf {
        self.input_dir
            .join(format!("{}{i}.{}", self.prefix, self.input_ext))
    }

    /// Output path for index `i`, always PNG.
    #[must_use]
    pub fn output_path(&self, i: u32) -> PathBuf {
        self.output_dir.join(format!("{}{i}.png", self.prefix))
    }
}

impl PrepConfig {
    /// Normalise and check every field.
    /// Called after TOML deserialization and after CLI overrides.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidRange`] if `first > last`, or
    /// [`CoreError::Config`] for an empty extension, or a path separator in
    /// an extension or the prefix.
    pub fn validate(&mut self) -> Result<(), CoreError> {
        self.rename.extension = normalize_ext(&self.rename.extension);
        self.strip.input_ext = normalize_ext(&self.strip.input_ext);

        if self.rename.extension.is_empty() {
            return Err(CoreError::Config("rename.extension est vide".into()));
        }
        if self.strip.input_ext.is_empty() {
            return Err(CoreError::Config("strip.input_ext est vide".into()));
        }
        for (field, value) in [
            ("rename.extension", &self.rename.extension),
            ("strip.input_ext", &self.strip.input_ext),
            ("strip.prefix", &self.strip.prefix),
        ] {
            if value.contains(['/', '\\']) {
                return Err(CoreError::Config(format!(
                    "{field} ne doit pas contenir de séparateur : {value}"
                )));
            }
        }
        if self.strip.first > self.strip.last {
            return Err(CoreError::InvalidRange {
                first: self.strip.first,
                last: self.strip.last,
            });
        }
        Ok(())
    }
}

fn normalize_ext(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_string()
}

/// Structure TOML intermédiaire pour désérialisation avec valeurs optionnelles.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    rename: Option<RenameSection>,
    strip: Option<StripSection>,
}

/// Rename section of the TOML config, all fields optional for partial override.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RenameSection {
    base_dir: Option<PathBuf>,
    extension: Option<String>,
}

/// Strip section of the TOML config, all fields optional.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct StripSection {
    input_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    prefix: Option<String>,
    input_ext: Option<String>,
    first: Option<u32>,
    last: Option<u32>,
    on_empty: Option<EmptyPolicy>,
}

/// Parse une configuration TOML et fusionne avec les valeurs par défaut.
///
/// Aucune validation ici : les overrides CLI peuvent encore corriger une
/// valeur, l'appelant appelle [`PrepConfig::validate`] ensuite.
///
/// # Errors
/// Returns an error if the TOML is malformed or has unknown fields.
///
/// # Example
/// ```
/// use pp_core::config::parse_config;
/// let config = parse_config("[strip]\nlast = 3\n").unwrap();
/// assert_eq!(config.strip.last, 3);
/// assert_eq!(config.strip.prefix, "Img");
/// ```
pub fn parse_config(content: &str) -> Result<PrepConfig> {
    let file: ConfigFile = toml::from_str(content).context("Erreur de parsing TOML")?;

    let mut config = PrepConfig::default();

    if let Some(r) = file.rename {
        if let Some(v) = r.base_dir {
            config.rename.base_dir = v;
        }
        if let Some(v) = r.extension {
            config.rename.extension = v;
        }
    }

    if let Some(s) = file.strip {
        if let Some(v) = s.input_dir {
            config.strip.input_dir = v;
        }
        if let Some(v) = s.output_dir {
            config.strip.output_dir = v;
        }
        if let Some(v) = s.prefix {
            config.strip.prefix = v;
        }
        if let Some(v) = s.input_ext {
            config.strip.input_ext = v;
        }
        if let Some(v) = s.first {
            config.strip.first = v;
        }
        if let Some(v) = s.last {
            config.strip.last = v;
        }
        if let Some(v) = s.on_empty {
            config.strip.on_empty = v;
        }
    }

    Ok(config)
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use pp_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("plantprep.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<PrepConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    parse_config(&content).with_context(|| format!("Configuration invalide dans {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_legacy_scripts() {
        let config = PrepConfig::default();
        assert_eq!(config.rename.base_dir, PathBuf::from("."));
        assert_eq!(config.rename.extension, "png");
        assert_eq!(config.strip.input_path(4), Path::new("./Img4.jpg"));
        assert_eq!(
            config.strip.output_path(4),
            Path::new("./processed_images/Img4.png")
        );
        assert_eq!(config.strip.on_empty, EmptyPolicy::Skip);
    }

    #[test]
    fn partial_toml_overrides_only_named_fields() {
        let mut config = parse_config(
            r#"
[rename]
extension = ".webp"

[strip]
output_dir = "out"
on_empty = "fail"
"#,
        )
        .unwrap();
        assert_eq!(config.rename.extension, ".webp");
        config.validate().unwrap();
        assert_eq!(config.rename.extension, "webp");
        assert_eq!(config.rename.base_dir, PathBuf::from("."));
        assert_eq!(config.strip.output_dir, PathBuf::from("out"));
        assert_eq!(config.strip.on_empty, EmptyPolicy::Fail);
        assert_eq!(config.strip.first, 1);
        assert_eq!(config.strip.last, 9);
    }

    #[test]
    fn empty_file_is_default() {
        assert_eq!(parse_config("").unwrap(), PrepConfig::default());
    }

    #[test]
    fn inverted_range_rejected() {
        let mut config = parse_config("[strip]\nfirst = 5\nlast = 2\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(CoreError::InvalidRange { first: 5, last: 2 })
        ));
    }

    #[test]
    fn range_from_file_can_be_fixed_before_validation() {
        let mut config = parse_config("[strip]\nfirst = 10\n").unwrap();
        config.strip.last = 12;
        config.validate().unwrap();
        assert_eq!((config.strip.first, config.strip.last), (10, 12));
    }

    #[test]
    fn separators_in_extensions_rejected() {
        for ext in ["x/y", "png\\..\\evil"] {
            let mut config = PrepConfig::default();
            config.rename.extension = ext.into();
            assert!(matches!(config.validate(), Err(CoreError::Config(_))), "{ext}");

            let mut config = PrepConfig::default();
            config.strip.input_ext = ext.into();
            assert!(matches!(config.validate(), Err(CoreError::Config(_))), "{ext}");
        }
    }

    #[test]
    fn unknown_field_rejected() {
        assert!(parse_config("[strip]\ncolour = 3\n").is_err());
    }

    #[test]
    fn empty_extension_rejected() {
        let mut config = PrepConfig::default();
        config.rename.extension = ".".into();
        assert!(matches!(config.validate(), Err(CoreError::Config(_))));
    }

    #[test]
    fn load_config_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&path, "[rename]\nbase_dir = \"photos\"\n").unwrap();
        let config = load_config(&path).unwrap();
        assert_eq!(config.rename.base_dir, PathBuf::from("photos"));
    }

    #[test]
    fn load_config_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(&dir.path().join("absent.toml")).is_err());
    }
}
