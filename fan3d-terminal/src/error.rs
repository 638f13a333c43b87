/// Result alias that carries the frontend [`AppError`] type.
pub type Result<T> = std::result::Result<T, AppError>;

/// Common error type for the terminal frontend. The core crate has no
/// fallible operations, so everything here comes from terminal setup and
/// output; failures surface at startup and are never recovered from.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Wrapper around terminal and output IO errors.
    #[error("terminal io: {0}")]
    Io(#[from] std::io::Error),
}
