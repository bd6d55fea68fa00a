use thiserror::Error;

///
/// All errors emitted while transcribing images.
/// The error messages can be displayed to users on the frontend.
///
/// - `FileNotFound`: When an image path does not exist
///     Parameters:
///     - `path`: The path which was missing
/// - `InvalidPath`: When a path has no usable file name to key its result by
///     Parameters:
///     - `path`: The offending path
/// - `Backend`: When a transcriber fails for a reason of its own
///     Parameters:
///     - `reason`: What went wrong
/// - `Python`: A wrapper for an error raised by a Python-backed transcriber
///
#[derive(Error, Debug)]
pub enum TranscriptionError {
    #[error("The image at path {} was not found.", .path)]
    FileNotFound { path: String },

    #[error("The path {} has no file name.", .path)]
    InvalidPath { path: String },

    #[error("Transcription failed: {}", .reason)]
    Backend { reason: String },

    #[cfg(feature = "python")]
    #[error("Python error during transcription: {}", .0)]
    Python(#[from] pyo3::PyErr),
}
