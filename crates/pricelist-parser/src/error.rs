use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkbookError {
    #[error("unsupported workbook format: {0} (expected .xlsx or .xls)")]
    UnsupportedFormat(String),

    #[error("failed to decode workbook: {0}")]
    Decode(String),

    #[error("failed to read sheet {sheet}: {reason}")]
    Sheet { sheet: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<calamine::Error> for WorkbookError {
    fn from(err: calamine::Error) -> Self {
        match err {
            calamine::Error::Io(e) => Self::Io(e),
            other => Self::Decode(other.to_string()),
        }
    }
}
