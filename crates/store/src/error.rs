use std::fmt;

#[derive(Debug)]
pub enum StoreError {
    /// File read/write failure. Fatal to the operation; the atomic
    /// rewrite discipline means the prior store content survives.
    Io(String),
    /// CSV-level failure while writing (reads are tolerant and never
    /// produce this).
    Write(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "store IO error: {msg}"),
            Self::Write(msg) => write!(f, "store write error: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}
