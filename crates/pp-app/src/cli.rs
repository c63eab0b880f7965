use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use pp_core::config::{EmptyPolicy, PrepConfig};

/// plantprep: batch tools for plant image folders.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Fichier de configuration TOML. Défaut : plantprep.toml s'il existe.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Renumérote les fichiers de chaque sous-dossier en 1.png, 2.png, …
    Rename {
        /// Dossier de base (défaut : ".").
        base_dir: Option<PathBuf>,

        /// Extension forcée des fichiers renommés.
        #[arg(long)]
        extension: Option<String>,

        /// Affiche les renommages sans les effectuer.
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },

    /// Rend le blanc pur transparent et recadre Img1.jpg..Img9.jpg.
    Strip {
        /// Dossier des images d'entrée (défaut : ".").
        #[arg(long)]
        input_dir: Option<PathBuf>,

        /// Dossier de sortie (défaut : ./processed_images).
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Préfixe des noms de fichiers (défaut : Img).
        #[arg(long)]
        prefix: Option<String>,

        /// Extension des images d'entrée (défaut : jpg).
        #[arg(long)]
        input_ext: Option<String>,

        /// Premier index (inclus).
        #[arg(long)]
        first: Option<u32>,

        /// Dernier index (inclus).
        #[arg(long)]
        last: Option<u32>,

        /// Que faire d'une image sans contenu après détourage.
        #[arg(long, value_enum)]
        on_empty: Option<OnEmpty>,
    },
}

/// CLI mirror of [`EmptyPolicy`].
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OnEmpty {
    Skip,
    Fail,
}

impl From<OnEmpty> for EmptyPolicy {
    fn from(v: OnEmpty) -> Self {
        match v {
            OnEmpty::Skip => Self::Skip,
            OnEmpty::Fail => Self::Fail,
        }
    }
}

impl Cli {
    /// Applique les overrides de la ligne de commande sur `config`.
    pub fn apply_overrides(&self, config: &mut PrepConfig) {
        match &self.command {
            Command::Rename {
                base_dir,
                extension,
                dry_run,
            } => {
                if let Some(v) = base_dir {
                    config.rename.base_dir.clone_from(v);
                }
                if let Some(v) = extension {
                    config.rename.extension.clone_from(v);
                }
                config.rename.dry_run = *dry_run;
            }
            Command::Strip {
                input_dir,
                output_dir,
                prefix,
                input_ext,
                first,
                last,
                on_empty,
            } => {
                if let Some(v) = input_dir {
                    config.strip.input_dir.clone_from(v);
                }
                if let Some(v) = output_dir {
                    config.strip.output_dir.clone_from(v);
                }
                if let Some(v) = prefix {
                    config.strip.prefix.clone_from(v);
                }
                if let Some(v) = input_ext {
                    config.strip.input_ext.clone_from(v);
                }
                if let Some(v) = first {
                    config.strip.first = *v;
                }
                if let Some(v) = last {
                    config.strip.last = *v;
                }
                if let Some(v) = on_empty {
                    config.strip.on_empty = (*v).into();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn bare_rename_keeps_defaults() {
        let cli = Cli::parse_from(["plantprep", "rename"]);
        let mut config = PrepConfig::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config, PrepConfig::default());
    }

    #[test]
    fn rename_overrides() {
        let cli = Cli::parse_from(["plantprep", "rename", "photos", "--dry-run"]);
        let mut config = PrepConfig::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.rename.base_dir, PathBuf::from("photos"));
        assert!(config.rename.dry_run);
    }

    #[test]
    fn cli_last_fixes_range_from_file() {
        let mut config = pp_core::config::parse_config("[strip]\nfirst = 10\n").unwrap();
        let cli = Cli::parse_from(["plantprep", "strip", "--last", "12"]);
        cli.apply_overrides(&mut config);
        config.validate().unwrap();
        assert_eq!((config.strip.first, config.strip.last), (10, 12));
    }

    #[test]
    fn strip_overrides() {
        let cli = Cli::parse_from([
            "plantprep",
            "--log-level",
            "info",
            "strip",
            "--output-dir",
            "out",
            "--first",
            "2",
            "--last",
            "4",
            "--on-empty",
            "fail",
        ]);
        assert_eq!(cli.log_level, "info");
        let mut config = PrepConfig::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.strip.output_dir, PathBuf::from("out"));
        assert_eq!((config.strip.first, config.strip.last), (2, 4));
        assert_eq!(config.strip.on_empty, EmptyPolicy::Fail);
        assert_eq!(config.strip.prefix, "Img");
    }
}
