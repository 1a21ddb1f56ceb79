use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    UtilsError(#[from] tvl_utils::Error),

    #[error(transparent)]
    CommonError(#[from] tvl_common::Error),

    #[error("Failed to create directory: {0:?}. (Error: {1:?})")]
    CreateDirAllFailed(PathBuf, std::io::Error),

    #[error("Failed to write CSV to {0:?}. (Error: {1})")]
    CsvWriteFailed(PathBuf, csv::Error),
}
