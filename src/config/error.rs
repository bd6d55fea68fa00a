use thiserror::Error;

use crate::error::CalcError;

///
/// All errors emitted while loading or saving a calculator configuration.
///
/// - `Io`: When the file could not be read or written
///     Parameters:
///     - `path`: The path of the file
///     - `source`: The underlying I/O error
/// - `Parse`: When the file is not valid configuration JSON, including out-of-range setup values
/// - `Calc`: When the configuration parses but cannot be evaluated
///
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not access the configuration file {}: {}", .path, .source)]
    Io { path: String, source: std::io::Error },

    #[error("The configuration could not be parsed: {}", .0)]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Calc(#[from] CalcError),
}
