use thiserror::Error;

/// Domain failures raised while validating data, configuration or colours.
///
/// I/O boundaries (loader, config file, export) wrap these in `anyhow` with
/// context describing what was being read or written.
#[derive(Error, Debug)]
pub enum ChartError {
    #[error("row {row}: time '{value}' is not in MM:SS format")]
    InvalidTime { row: usize, value: String },

    #[error("time '{0}' is not in MM:SS format")]
    UnparsableTime(String),

    #[error("dataset contains no records")]
    EmptyDataset,

    #[error("invalid colour '{value}': {message}")]
    InvalidColor { value: String, message: String },

    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),
}

pub type Result<T> = std::result::Result<T, ChartError>;
