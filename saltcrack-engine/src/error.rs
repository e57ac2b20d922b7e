#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid thread count {got}. Must be between 1 and 26.")]
    InvalidThreadCount { got: usize },

    #[error("Target hash '{hash}' is not in modular crypt format ($id$salt$hash)")]
    MalformedTargetHash { hash: String },

    #[error("Hashing failed: {0}")]
    Hash(#[from] pwhash::error::Error),
}
