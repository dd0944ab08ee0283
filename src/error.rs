use thiserror::Error;

/// The only error that escapes the pipeline. Everything recoverable
/// (unknown columns, unparseable cells) is absorbed into the cleaning
/// counters instead.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read input file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed CSV input: {0}")]
    Csv(#[from] csv::Error),
}
