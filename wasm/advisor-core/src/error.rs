use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Token is not one of 2-10, J, Q, K, A (after trimming, any case).
    #[error("invalid card input: {0:?}")]
    InvalidCardInput(String),
}
