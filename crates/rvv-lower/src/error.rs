#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("argument {index} of `{builtin}` must be a compile-time constant")]
    NotAConstant { builtin: String, index: usize },

    #[error("unsupported operation: {0}")]
    Unsupported(String),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;
