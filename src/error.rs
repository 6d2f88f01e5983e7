//! Error kinds (`spec.md` §7). CLI/version errors are fatal; I/O and
//! decode errors are reported and handled locally by the driver.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("unknown extension '{0}'")]
    UnknownExtension(String),

    #[error("extension '{name}' has no major version {major}")]
    InvalidMajor { name: String, major: u16 },

    #[error("extension '{name}-{major}' has no minor version {minor}")]
    UnknownVersion {
        name: String,
        major: u16,
        minor: u16,
    },

    #[error("invalid major version '{0}'")]
    InvalidMajorSyntax(String),

    #[error("invalid minor version '{0}'")]
    InvalidMinorSyntax(String),
}
