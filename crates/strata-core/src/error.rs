use thiserror::Error;

/// Canonical result for core.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Internal invariant failed: {0}")]
    Invariant(String),

    // The core crate does not touch storage itself, but higher layers map
    // their resource faults into this variant so they cross one boundary.
    #[error("Resource fault: {0}")]
    Fault(String),
}

impl Error {
    /// Add context to an error message, keeping the variant.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        let ctx = context.into();
        match self {
            Error::Config(msg) => Error::Config(format!("{}: {}", ctx, msg)),
            Error::Schema(msg) => Error::Schema(format!("{}: {}", ctx, msg)),
            Error::Invariant(msg) => Error::Invariant(format!("{}: {}", ctx, msg)),
            Error::Fault(msg) => Error::Fault(format!("{}: {}", ctx, msg)),
        }
    }
}
