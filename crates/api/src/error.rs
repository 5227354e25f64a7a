use thiserror::Error;

/// Error returned to callers of the reminder operations
#[derive(Error, Debug, PartialEq)]
pub enum ReminderError {
    #[error("Internal error")]
    InternalError,
    #[error("Invalid data provided: Error message: `{0}`")]
    BadClientData(String),
    #[error("Not found. Error message: `{0}`")]
    NotFound(String),
    #[error("Legacy reminders could not be migrated. Error message: `{0}`")]
    MigrationFailed(String),
}
