use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum AcervoError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Ractor error: {0}")]
    RactorError(String),

    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}
