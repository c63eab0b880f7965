use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::{ImageFormat, ImageReader};
use pp_core::config::{EmptyPolicy, StripConfig};

use crate::crop::crop_to_content;
use crate::error::StripError;
use crate::key::key_out_white;

/// Issue du traitement d'un index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StripOutcome {
    /// Image détourée et écrite.
    Processed {
        /// Image source.
        input: PathBuf,
        /// PNG written.
        output: PathBuf,
        /// Width after crop.
        width: u32,
        /// Height after crop.
        height: u32,
    },
    /// Fichier d'entrée absent.
    Skipped {
        /// Expected input path.
        input: PathBuf,
    },
    /// Aucun contenu après détourage, rien n'a été écrit.
    Empty {
        /// Image source.
        input: PathBuf,
    },
}

/// Outcomes in index order.
#[derive(Debug, Default)]
pub struct StripReport {
    /// One outcome per index, `first` to `last`.
    pub outcomes: Vec<StripOutcome>,
}

impl StripReport {
    /// Nombre d'images écrites.
    #[must_use]
    pub fn processed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, StripOutcome::Processed { .. }))
            .count()
    }
}

/// Détoure une image : blanc pur -> transparent, recadrage, écriture PNG.
///
/// Un fichier d'entrée absent donne [`StripOutcome::Skipped`]. Toute autre
/// erreur (décodage, format, écriture) est remontée.
///
/// # Errors
/// Returns an error if the input cannot be decoded, the output cannot be
/// written, or the image is empty under [`EmptyPolicy::Fail`].
pub fn strip_image(input: &Path, output: &Path, on_empty: EmptyPolicy) -> Result<StripOutcome> {
    let reader = match ImageReader::open(input) {
        Ok(reader) => reader,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::debug!("Introuvable : {}", input.display());
            return Ok(StripOutcome::Skipped {
                input: input.to_path_buf(),
            });
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Impossible d'ouvrir {}", input.display()));
        }
    };
    // Format lu dans les octets, l'extension ne sert que de repli.
    let img = reader
        .with_guessed_format()
        .with_context(|| format!("Impossible de lire {}", input.display()))?
        .decode()
        .with_context(|| format!("Impossible de charger {}", input.display()))?;

    let mut rgba = img.to_rgba8();
    let keyed = key_out_white(&mut rgba);
    log::debug!(
        "{}: {keyed} pixel(s) blancs sur {}",
        input.display(),
        u64::from(rgba.width()) * u64::from(rgba.height())
    );

    let cropped = match crop_to_content(&rgba) {
        Ok(c) => c,
        Err(e @ StripError::NoContent { .. }) => match on_empty {
            EmptyPolicy::Skip => {
                log::warn!("{}: {e}", input.display());
                return Ok(StripOutcome::Empty {
                    input: input.to_path_buf(),
                });
            }
            EmptyPolicy::Fail => {
                return Err(e).with_context(|| format!("Détourage de {}", input.display()));
            }
        },
    };

    cropped
        .save_with_format(output, ImageFormat::Png)
        .with_context(|| format!("Impossible d'écrire {}", output.display()))?;

    Ok(StripOutcome::Processed {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        width: cropped.width(),
        height: cropped.height(),
    })
}

/// Traite `{prefix}{first}` .. `{prefix}{last}` dans l'ordre.
///
/// Crée `output_dir` si besoin. `on_outcome` est appelé après chaque index.
///
/// # Errors
/// Returns the first fatal error; a missing input is not one.
pub fn strip_backgrounds(
    config: &StripConfig,
    mut on_outcome: impl FnMut(&StripOutcome),
) -> Result<StripReport> {
    std::fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("Impossible de créer {}", config.output_dir.display()))?;

    let mut report = StripReport::default();
    for i in config.first..=config.last {
        let outcome = strip_image(
            &config.input_path(i),
            &config.output_path(i),
            config.on_empty,
        )?;
        on_outcome(&outcome);
        report.outcomes.push(outcome);
    }

    log::info!(
        "{} image(s) écrites sur {} dans {}",
        report.processed(),
        report.outcomes.len(),
        config.output_dir.display()
    );
    Ok(report)
}
