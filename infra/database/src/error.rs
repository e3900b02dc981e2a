use std::borrow::Cow;

/// Errors produced while connecting to or migrating the database.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// Missing or malformed builder parameters.
    #[error("Database validation error: {message}")]
    Validation { message: Cow<'static, str> },

    /// The engine failed to start or stayed unhealthy.
    #[error("Database connection error: {message}")]
    Connection { message: Cow<'static, str> },

    /// Root credentials were rejected.
    #[error("Database authentication error: {message}")]
    Auth { message: Cow<'static, str> },

    /// A schema migration failed to apply.
    #[error("Database migration error: {message}")]
    Migration { message: Cow<'static, str> },

    /// Any other error surfaced by the SurrealDB client.
    #[error(transparent)]
    Surreal(#[from] surrealdb::Error),
}
