use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("Unknown ingredient category: {0}")]
    UnknownCategory(String),

    #[error("Invalid ingredient: {0}")]
    InvalidIngredient(String),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),
}

pub type Result<T> = std::result::Result<T, Error>;
