#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Engine(#[from] saltcrack_engine::Error),

    #[error("Password '{password}' is not in the LetterLetterDigitDigit format (e.g. AB07)")]
    PasswordOutsideKeyspace { password: String },
}
