use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Csv(#[from] csv::Error),
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("{0}")]
    Xdg(#[from] xdg::BaseDirectoriesError),
    #[error("Invalid format for date: {0} (only accept %Y-%m-%d)")]
    Date(#[from] chrono::ParseError),
    #[error("Invalid number: {0}")]
    NumberFormat(#[from] std::num::ParseFloatError),
    #[error("Amount must be greater than zero (got {amount})")]
    InvalidAmount { amount: String },
    #[error("Invalid amount: {value}")]
    IncorrectAmount { value: String },
    #[error("Invalid month: {value} (only accept %Y-%m)")]
    InvalidMonth { value: String },
    #[error("An error occurred while determining the path for: {message}")]
    IncorrectPath { message: String },
    #[error("Configuration file already exists, use --force to overwrite it")]
    ExistingConfiguration,
    #[error("File {filepath} already exists, use --force to overwrite it")]
    ExistingFile { filepath: String },
    #[error("The currency code '{code}' is not supported")]
    IncorrectCurrencyCode { code: String },
    #[error("The category '{name}' does not exist")]
    UnknownCategory { name: String },
    #[error("Another instance already loaded '{filepath}'")]
    LockNotAcquired { filepath: String },
}
