use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BikeshareError {
    #[error("Data file not found: {}", .0.display())]
    DataFileNotFound(PathBuf),

    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown {kind}: '{value}'")]
    UnknownChoice { kind: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, BikeshareError>;
