use thiserror::Error;

#[derive(Error, Debug)]
pub enum BasketError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("List name already taken: {0}")]
    DuplicateName(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl BasketError {
    pub fn not_found_list(id: impl std::fmt::Display) -> Self {
        Self::NotFound(format!("List {}", id))
    }
}
