//!
//! Text recognition over pill packaging photos. The recognition models are external, this module
//! only defines how images are fed to them and how results are collected.
//!

pub mod error;
#[cfg(feature = "python")]
pub mod python;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use error::TranscriptionError;

///
/// The text recognised in one image.
///
/// - `Lines`: Separate pieces of text found in the image, in reading order
/// - `Caption`: A single generated line of text describing the image
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transcription {
    Lines(Vec<String>),
    Caption(String),
}

///
/// The trait for all text recognisers to implement. Implementations hold an already-initialised
/// model.
///
/// # Functions:
/// - `name`: Should return a short display name of the recogniser
/// - `transcribe`: Should return the text found in the image at the given path, or an error
///
pub trait Transcriber {
    fn name(&self) -> &'static str;

    fn transcribe(&self, path: &Path) -> Result<Transcription, TranscriptionError>;
}

///
/// Transcribes a batch of images.
///
/// # Parameters:
/// - `transcriber`: The initialised recogniser
/// - `paths`: The image paths, which must exist
///
/// # Returns:
/// - A map from each image's file name to its transcription
/// - The first error encountered, if any image was missing or failed
///
pub fn transcribe_images(transcriber: &dyn Transcriber, paths: &[PathBuf]) -> Result<BTreeMap<String, Transcription>, TranscriptionError> {
    let mut results = BTreeMap::new();

    for path in paths {
        let file_name = match path.file_name().and_then(|name| name.to_str()) {
            Some(name) => name.to_owned(),
            None => return Err(TranscriptionError::InvalidPath { path: path.display().to_string() }),
        };

        if !path.is_file() {
            return Err(TranscriptionError::FileNotFound { path: path.display().to_string() });
        }

        log::info!("Transcribing {} with {}", file_name, transcriber.name());
        let transcription = transcriber.transcribe(path)?;
        results.insert(file_name, transcription);
    }

    Ok(results)
}

///
/// Extends a list of photos with their cropped counterparts, which sit next to each original as
/// `<stem>_cropped.<ext>`. Originals come first, in order, followed by the cropped versions.
///
/// # Parameters:
/// - `paths`: The original image paths
///
/// # Returns:
/// - The originals followed by the cropped paths. An original without an extension is paired
///   with a `.jpg` crop.
///
pub fn with_cropped_variants(paths: &[PathBuf]) -> Vec<PathBuf> {
    let cropped = paths.iter().filter_map(|path| {
        let stem = path.file_stem()?.to_str()?;
        let ext = path.extension().and_then(|ext| ext.to_str()).unwrap_or("jpg");
        Some(path.with_file_name(format!("{}_cropped.{}", stem, ext)))
    });

    paths.iter().cloned().chain(cropped).collect()
}
